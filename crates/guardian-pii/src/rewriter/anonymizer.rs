//! Synthetic value generation per category
//!
//! Each category maps to one generator. Most generators only need the corpus
//! and the random source; a few inspect the matched text to pick a template
//! that fits what was actually found (PAN vs Aadhaar, IFSC vs account number,
//! IPv4 vs IPv6, and so on).

use crate::rewriter::SyntheticCorpus;
use guardian_core::Category;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use regex::Regex;

type Generator = fn(&Anonymizer, &str, &mut dyn RngCore) -> String;

const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

/// Category-aware synthetic value generator
pub struct Anonymizer {
    corpus: SyntheticCorpus,
    other_placeholder: String,
    pan: Regex,
    aadhaar: Regex,
    ifsc: Regex,
    account_number: Regex,
}

impl Anonymizer {
    /// Create an anonymizer drawing from `corpus`.
    ///
    /// `other_placeholder` is returned for the `other` category, which has no
    /// meaningful synthetic form.
    pub fn new(
        corpus: SyntheticCorpus,
        other_placeholder: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            corpus,
            other_placeholder: other_placeholder.into(),
            pan: Regex::new(r"[A-Z]{5}\d{4}[A-Z]")?,
            aadhaar: Regex::new(r"\d{4}[\s-]?\d{4}[\s-]?\d{4}")?,
            ifsc: Regex::new(r"[A-Z]{4}0[A-Z0-9]{6}")?,
            account_number: Regex::new(r"\d{9,18}")?,
        })
    }

    /// Produce a synthetic replacement for `text`, detected as `category`
    pub fn anonymize(&self, category: Category, text: &str, rng: &mut dyn RngCore) -> String {
        let generate = generator_for(category);
        generate(self, text, rng)
    }

    fn pick<'a>(&self, list: &'a [String], rng: &mut dyn RngCore) -> &'a str {
        list.choose(rng).map(String::as_str).unwrap_or_default()
    }

    fn name(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        format!(
            "{} {}",
            self.pick(&self.corpus.first_names, rng),
            self.pick(&self.corpus.last_names, rng)
        )
    }

    fn email(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        let local = self.pick(&self.corpus.first_names, rng).to_lowercase();
        let number: u32 = rng.random_range(0..1000);
        let domain = self.pick(&self.corpus.email_domains, rng);
        format!("{}.{}@{}", local, number, domain)
    }

    /// Ten digits starting 6-9, with two positions masked
    fn phone(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        let mut digits: Vec<char> = Vec::with_capacity(10);
        digits.push(char::from(b'0' + rng.random_range(6..=9u8)));
        for _ in 0..9 {
            digits.push(char::from(b'0' + rng.random_range(0..=9u8)));
        }
        for index in rand::seq::index::sample(rng, digits.len(), 2) {
            digits[index] = 'X';
        }
        digits.into_iter().collect()
    }

    fn address(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        let house: u32 = rng.random_range(1000..10000);
        let street = self.pick(&self.corpus.street_names, rng);
        let city = self.pick(&self.corpus.cities, rng);
        let state = self.pick(&self.corpus.states, rng);
        let zip: u32 = rng.random_range(10000..100000);
        format!("{} {}, {}, {} {}", house, street, city, state, zip)
    }

    fn masked_ssn(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        format!("XXX-XX-{}", rng.random_range(1000..10000u32))
    }

    fn masked_card(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        format!("XXXX-XXXX-XXXX-{}", rng.random_range(1000..10000u32))
    }

    fn health(&self, text: &str, rng: &mut dyn RngCore) -> String {
        let lower = text.to_lowercase();
        if lower.contains("patient") {
            format!("Patient at {}", self.pick(&self.corpus.hospitals, rng))
        } else if lower.contains("diagnosis") {
            format!("Diagnosis: {}", self.pick(&self.corpus.conditions, rng))
        } else if lower.contains("treatment") {
            format!("Treatment: {}", self.pick(&self.corpus.medications, rng))
        } else {
            self.medical_record_number(text, rng)
        }
    }

    fn medical_record_number(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        format!("MRN-{}", rng.random_range(100000..1000000u32))
    }

    fn other(&self, _text: &str, _rng: &mut dyn RngCore) -> String {
        self.other_placeholder.clone()
    }

    fn indian_id(&self, text: &str, rng: &mut dyn RngCore) -> String {
        if self.pan.is_match(text) {
            format!("XXXXX{}X", rng.random_range(1000..10000u32))
        } else if self.aadhaar.is_match(text) {
            format!("XXXX-XXXX-{}", rng.random_range(1000..10000u32))
        } else {
            self.pick(&self.corpus.indian_id_types, rng).to_string()
        }
    }

    fn indian_financial(&self, text: &str, rng: &mut dyn RngCore) -> String {
        let bank = self.pick(&self.corpus.banks, rng);
        if self.ifsc.is_match(text) {
            let mut code: String = bank
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase())
                .take(4)
                .collect();
            while code.len() < 4 {
                code.push('X');
            }
            format!("{}0{}", code, rng.random_range(100000..1000000u32))
        } else if self.account_number.is_match(text) {
            format!("XXXXXXXX{}", rng.random_range(1000..10000u32))
        } else {
            let handle: String = bank
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            format!("XXXXX@{}", handle)
        }
    }

    fn passport(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        let letter = char::from(b'A' + rng.random_range(0..26u8));
        format!("{}{}", letter, rng.random_range(1000000..10000000u32))
    }

    fn drivers_license(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        format!("DL-{}", rng.random_range(1_000_000_000..10_000_000_000u64))
    }

    fn vin(&self, _text: &str, rng: &mut dyn RngCore) -> String {
        (0..17)
            .map(|_| char::from(VIN_ALPHABET[rng.random_range(0..VIN_ALPHABET.len())]))
            .collect()
    }

    /// Addresses from the documentation ranges (192.0.2.0/24, 2001:db8::/32)
    fn ip_address(&self, text: &str, rng: &mut dyn RngCore) -> String {
        if text.contains(':') {
            format!("2001:db8::{:x}", rng.random_range(1..=0xffffu32))
        } else {
            format!("192.0.2.{}", rng.random_range(1..255u32))
        }
    }

    /// Locally administered address, keeping the original separator
    fn mac_address(&self, text: &str, rng: &mut dyn RngCore) -> String {
        let sep = if text.contains('-') { '-' } else { ':' };
        let tail: Vec<String> = (0..3)
            .map(|_| format!("{:02X}", rng.random_range(0..=255u8)))
            .collect();
        format!("02{sep}00{sep}00{sep}{}", tail.join(&sep.to_string()))
    }
}

fn generator_for(category: Category) -> Generator {
    match category {
        Category::Name => Anonymizer::name,
        Category::Email => Anonymizer::email,
        Category::Phone => Anonymizer::phone,
        Category::Address => Anonymizer::address,
        Category::Id | Category::Ssn => Anonymizer::masked_ssn,
        Category::Financial | Category::CreditCard => Anonymizer::masked_card,
        Category::Health => Anonymizer::health,
        Category::Other => Anonymizer::other,
        Category::IndianId => Anonymizer::indian_id,
        Category::IndianFinancial => Anonymizer::indian_financial,
        Category::Passport => Anonymizer::passport,
        Category::DriversLicense => Anonymizer::drivers_license,
        Category::Vin => Anonymizer::vin,
        Category::IpAddress => Anonymizer::ip_address,
        Category::MacAddress => Anonymizer::mac_address,
        Category::PatientId => Anonymizer::medical_record_number,
    }
}
