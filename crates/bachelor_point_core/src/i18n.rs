//! crates/bachelor_point_core/src/i18n.rs
//!
//! English/Bengali string pairs for every status and error the flows surface.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Bn,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Bn,
            Language::Bn => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "bn" => Ok(Language::Bn),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// A user-visible message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    EnterValidPhone,
    EnterName,
    EnterValidEmail,
    SelectDivision,
    SelectDistrict,
    EnterAddress,
    EnterSixDigitCode,
    OtpSendFailed,
    OtpVerifyFailed,
    InvalidOtp,
    OtpResendFailed,
    ResendNotReady,
    RequestTimedOut,
    AccountCreated,
    WelcomeBack,
    TooManyImages,
    TooManyVideos,
    ListingPosted,
    ListingPostFailed,
}

impl Message {
    pub fn text(self, language: Language) -> &'static str {
        let (en, bn) = self.pair();
        match language {
            Language::En => en,
            Language::Bn => bn,
        }
    }

    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Message::EnterValidPhone => (
                "Please enter a valid phone number",
                "একটি বৈধ ফোন নম্বর দিন",
            ),
            Message::EnterName => (
                "Please enter your name",
                "আপনার নাম লিখুন",
            ),
            Message::EnterValidEmail => (
                "Please enter a valid email",
                "একটি বৈধ ইমেইল দিন",
            ),
            Message::SelectDivision => (
                "Please select your division",
                "আপনার বিভাগ নির্বাচন করুন",
            ),
            Message::SelectDistrict => (
                "Please select your district",
                "আপনার জেলা নির্বাচন করুন",
            ),
            Message::EnterAddress => (
                "Please enter your address",
                "আপনার ঠিকানা লিখুন",
            ),
            Message::EnterSixDigitCode => (
                "Enter 6-digit code",
                "৬ সংখ্যার কোড দিন",
            ),
            Message::OtpSendFailed => (
                "Failed to send OTP. Please try again.",
                "OTP পাঠাতে ব্যর্থ। আবার চেষ্টা করুন।",
            ),
            Message::OtpVerifyFailed => (
                "Failed to verify OTP. Please try again.",
                "OTP যাচাই করতে ব্যর্থ। আবার চেষ্টা করুন।",
            ),
            Message::InvalidOtp => (
                "Invalid OTP. Please try again.",
                "ভুল OTP। আবার চেষ্টা করুন।",
            ),
            Message::OtpResendFailed => (
                "Failed to resend OTP",
                "OTP পুনরায় পাঠাতে ব্যর্থ",
            ),
            Message::ResendNotReady => (
                "Please wait before requesting a new code",
                "নতুন কোডের জন্য অনুগ্রহ করে অপেক্ষা করুন",
            ),
            Message::RequestTimedOut => (
                "The request timed out. Please try again.",
                "অনুরোধের সময় শেষ। আবার চেষ্টা করুন।",
            ),
            Message::AccountCreated => (
                "Account Created Successfully!",
                "অ্যাকাউন্ট সফলভাবে তৈরি হয়েছে!",
            ),
            Message::WelcomeBack => ("Welcome Back!", "আবার স্বাগতম!"),
            Message::TooManyImages => (
                "You can upload at most 10 photos",
                "আপনি সর্বোচ্চ ১০টি ছবি আপলোড করতে পারবেন",
            ),
            Message::TooManyVideos => (
                "You can upload at most 2 videos",
                "আপনি সর্বোচ্চ ২টি ভিডিও আপলোড করতে পারবেন",
            ),
            Message::ListingPosted => (
                "Property posted successfully!",
                "প্রপার্টি সফলভাবে পোস্ট হয়েছে!",
            ),
            Message::ListingPostFailed => (
                "Failed to post property. Please try again.",
                "প্রপার্টি পোস্ট করতে ব্যর্থ। আবার চেষ্টা করুন।",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_follows_language() {
        assert_eq!(Message::WelcomeBack.text(Language::En), "Welcome Back!");
        assert_eq!(Message::WelcomeBack.text(Language::Bn), "আবার স্বাগতম!");
    }

    #[test]
    fn language_parses_and_toggles() {
        assert_eq!("BN".parse::<Language>(), Ok(Language::Bn));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::En.toggled(), Language::Bn);
        assert_eq!(Language::Bn.toggled(), Language::En);
    }
}
