//! Display strings for the page, per locale

use std::fmt;
use std::str::FromStr;

/// Every literal string the page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub detected_items_heading: &'static str,
    pub quantity_label: &'static str,
    pub expires_in_label: &'static str,
    pub days_unit: &'static str,
    pub recipes_heading: &'static str,
    pub preparation_time_label: &'static str,
    pub minutes_unit: &'static str,
    pub ingredients_label: &'static str,
    pub instructions_label: &'static str,
    pub impact_heading: &'static str,
    pub avoided_emissions_label: &'static str,
    pub items_saved_label: &'static str,
    /// Joins `items_saved` and `total_items`
    pub items_of: &'static str,
    pub items_unit: &'static str,
    pub waste_prevented_label: &'static str,
    pub contribute_button: &'static str,
    pub contribute_prompt: &'static str,
    pub contribution_thanks: &'static str,
    pub no_contributors: &'static str,
    pub error_prefix: &'static str,
    pub unknown_error: &'static str,
    pub upload_failed: &'static str,
    pub contribution_failed: &'static str,
}

pub static ENGLISH: Messages = Messages {
    detected_items_heading: "Detected Items",
    quantity_label: "Quantity:",
    expires_in_label: "Expires in:",
    days_unit: "days",
    recipes_heading: "Recommended Recipes",
    preparation_time_label: "Preparation time:",
    minutes_unit: "minutes",
    ingredients_label: "Ingredients:",
    instructions_label: "Instructions:",
    impact_heading: "Environmental Impact",
    avoided_emissions_label: "Avoidable emissions:",
    items_saved_label: "Items saved:",
    items_of: "of",
    items_unit: "items",
    waste_prevented_label: "Waste prevented:",
    contribute_button: "Contribute to Leaderboard",
    contribute_prompt: "Enter your name to contribute to the leaderboard:",
    contribution_thanks: "Thank you for your contribution!",
    no_contributors: "No contributors yet. Be the first!",
    error_prefix: "Error:",
    unknown_error: "unknown error",
    upload_failed: "An error occurred while processing the image",
    contribution_failed: "An error occurred while submitting your contribution",
};

pub static INDONESIAN: Messages = Messages {
    detected_items_heading: "Item yang Terdeteksi",
    quantity_label: "Jumlah:",
    expires_in_label: "Kadaluarsa dalam:",
    days_unit: "hari",
    recipes_heading: "Rekomendasi Resep",
    preparation_time_label: "Waktu persiapan:",
    minutes_unit: "menit",
    ingredients_label: "Bahan:",
    instructions_label: "Instruksi:",
    impact_heading: "Dampak Lingkungan",
    avoided_emissions_label: "Emisi yang dapat dihindari:",
    items_saved_label: "Item yang diselamatkan:",
    items_of: "dari",
    items_unit: "item",
    waste_prevented_label: "Pemborosan yang dicegah:",
    contribute_button: "Kontribusi ke Leaderboard",
    contribute_prompt: "Masukkan nama Anda untuk kontribusi ke leaderboard:",
    contribution_thanks: "Terima kasih atas kontribusi Anda!",
    no_contributors: "Belum ada kontributor. Jadilah yang pertama!",
    error_prefix: "Error:",
    unknown_error: "kesalahan tidak diketahui",
    upload_failed: "Terjadi kesalahan saat memproses gambar",
    contribution_failed: "Terjadi kesalahan saat mengirim kontribusi Anda",
};

/// Language of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Indonesian,
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::English => &ENGLISH,
            Locale::Indonesian => &INDONESIAN,
        }
    }

    /// Locale for an HTML `lang` attribute, falling back to English
    pub fn from_lang_attribute(lang: &str) -> Self {
        let primary = lang.split(['-', '_']).next().unwrap_or_default();
        primary.parse().unwrap_or_default()
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "id" | "indonesian" => Ok(Locale::Indonesian),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Indonesian => write!(f, "id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("ID".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert_eq!("indonesian".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_lang_attribute() {
        assert_eq!(Locale::from_lang_attribute("id-ID"), Locale::Indonesian);
        assert_eq!(Locale::from_lang_attribute("en_US"), Locale::English);
        assert_eq!(Locale::from_lang_attribute(""), Locale::English);
        assert_eq!(Locale::from_lang_attribute("de"), Locale::English);
    }

    #[test]
    fn test_display_round_trips() {
        for locale in [Locale::English, Locale::Indonesian] {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_english_has_no_contributors_literal() {
        assert!(Locale::default()
            .messages()
            .no_contributors
            .to_lowercase()
            .contains("no contributors"));
    }
}
