//! crates/bachelor_point_core/src/catalog.rs
//!
//! Fixed lookup tables: divisions and their districts, and the amenity catalog.

/// Every division in display order, each with its districts. The first district is the namesake.
pub const DIVISIONS: [(&str, &[&str]); 8] = [
    (
        "Dhaka",
        &[
            "Dhaka",
            "Faridpur",
            "Gazipur",
            "Gopalganj",
            "Kishoreganj",
            "Madaripur",
            "Manikganj",
            "Munshiganj",
            "Narayanganj",
            "Narsingdi",
            "Rajbari",
            "Shariatpur",
            "Tangail",
        ],
    ),
    (
        "Chittagong",
        &[
            "Chittagong",
            "Bandarban",
            "Brahmanbaria",
            "Chandpur",
            "Comilla",
            "Cox's Bazar",
            "Feni",
            "Khagrachhari",
            "Lakshmipur",
            "Noakhali",
            "Rangamati",
        ],
    ),
    ("Sylhet", &["Sylhet", "Habiganj", "Moulvibazar", "Sunamganj"]),
    (
        "Rajshahi",
        &[
            "Rajshahi",
            "Bogra",
            "Joypurhat",
            "Naogaon",
            "Natore",
            "Nawabganj",
            "Pabna",
            "Sirajganj",
        ],
    ),
    (
        "Khulna",
        &[
            "Khulna",
            "Bagerhat",
            "Chuadanga",
            "Jessore",
            "Jhenaidah",
            "Kushtia",
            "Magura",
            "Meherpur",
            "Narail",
            "Satkhira",
        ],
    ),
    (
        "Barisal",
        &["Barisal", "Barguna", "Bhola", "Jhalokati", "Patuakhali", "Pirojpur"],
    ),
    (
        "Rangpur",
        &[
            "Rangpur",
            "Dinajpur",
            "Gaibandha",
            "Kurigram",
            "Lalmonirhat",
            "Nilphamari",
            "Panchagarh",
            "Thakurgaon",
        ],
    ),
    ("Mymensingh", &["Mymensingh", "Jamalpur", "Netrakona", "Sherpur"]),
];

pub fn division_names() -> impl Iterator<Item = &'static str> {
    DIVISIONS.iter().map(|(name, _)| *name)
}

/// Returns the districts of `division`, or `None` for anything outside the fixed eight.
pub fn districts_for(division: &str) -> Option<&'static [&'static str]> {
    DIVISIONS
        .iter()
        .find(|(name, _)| *name == division)
        .map(|(_, districts)| *districts)
}

pub fn is_known_division(division: &str) -> bool {
    districts_for(division).is_some()
}

pub fn division_has_district(division: &str, district: &str) -> bool {
    districts_for(division).is_some_and(|districts| districts.contains(&district))
}

/// An amenity the form offers as a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amenity {
    pub id: &'static str,
    pub label: &'static str,
    pub label_local: &'static str,
}

pub const AMENITIES: [Amenity; 10] = [
    Amenity {
        id: "wifi",
        label: "WiFi",
        label_local: "ওয়াইফাই",
    },
    Amenity {
        id: "ac",
        label: "Air Conditioning",
        label_local: "এয়ার কন্ডিশনার",
    },
    Amenity {
        id: "parking",
        label: "Parking",
        label_local: "পার্কিং",
    },
    Amenity {
        id: "security",
        label: "24/7 Security",
        label_local: "২৪/৭ নিরাপত্তা",
    },
    Amenity {
        id: "kitchen",
        label: "Kitchen Access",
        label_local: "রান্নাঘর",
    },
    Amenity {
        id: "gym",
        label: "Gym",
        label_local: "জিম",
    },
    Amenity {
        id: "laundry",
        label: "Laundry",
        label_local: "লন্ড্রি",
    },
    Amenity {
        id: "balcony",
        label: "Balcony",
        label_local: "বারান্দা",
    },
    Amenity {
        id: "elevator",
        label: "Elevator",
        label_local: "লিফট",
    },
    Amenity {
        id: "generator",
        label: "Generator",
        label_local: "জেনারেটর",
    },
];

pub fn amenity(id: &str) -> Option<&'static Amenity> {
    AMENITIES.iter().find(|a| a.id == id)
}
