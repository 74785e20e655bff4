//! Immutable currency metadata registry.
//!
//! The registry is assembled once during start-up and then shared by
//! reference (usually behind an `Arc`). Nothing mutates it afterwards, so
//! lookups need no locking.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::RegistryError;
use crate::monetary::Currency;

/// Longest code accepted by [`CurrencyRegistryBuilder::register`].
const MAX_CODE_LEN: usize = 10;

/// ISO 4217 currencies: code, display symbol, minor units.
const ISO_4217: &[(&str, &str, u32)] = &[
    ("AED", ".\u{62f}.\u{625}", 2), ("AFN", "\u{60b}", 2), ("ALL", "L", 2), ("AMD", "\u{58f}", 2),
    ("ANG", "\u{192}", 2), ("AOA", "Kz", 2), ("ARS", "$", 2), ("AUD", "$", 2),
    ("AWG", "\u{192}", 2), ("AZN", "\u{20bc}", 2), ("BAM", "KM", 2), ("BBD", "$", 2),
    ("BDT", "\u{9f3}", 2), ("BGN", "\u{43b}\u{432}", 2), ("BHD", ".\u{62f}.\u{628}", 3), ("BIF", "Fr", 0),
    ("BMD", "$", 2), ("BND", "$", 2), ("BOB", "Bs.", 2), ("BRL", "R$", 2),
    ("BSD", "$", 2), ("BTN", "Nu.", 2), ("BWP", "P", 2), ("BYN", "Br", 2),
    ("BZD", "BZ$", 2), ("CAD", "$", 2), ("CDF", "FC", 2), ("CHF", "CHF", 2),
    ("CLP", "$", 0), ("CNY", "\u{a5}", 2), ("COP", "$", 2), ("CRC", "\u{20a1}", 2),
    ("CUP", "\u{20b1}", 2), ("CVE", "$", 2), ("CZK", "K\u{10d}", 2), ("DJF", "Fdj", 0),
    ("DKK", "kr", 2), ("DOP", "RD$", 2), ("DZD", "\u{62f}.\u{62c}", 2), ("EGP", "\u{a3}", 2),
    ("ERN", "Nfk", 2), ("ETB", "Br", 2), ("EUR", "\u{20ac}", 2), ("FJD", "$", 2),
    ("FKP", "\u{a3}", 2), ("GBP", "\u{a3}", 2), ("GEL", "\u{20be}", 2), ("GGP", "\u{a3}", 2),
    ("GHS", "\u{20b5}", 2), ("GIP", "\u{a3}", 2), ("GMD", "D", 2), ("GNF", "FG", 0),
    ("GTQ", "Q", 2), ("GYD", "$", 2), ("HKD", "$", 2), ("HNL", "L", 2),
    ("HTG", "G", 2), ("HUF", "Ft", 2), ("IDR", "Rp", 2), ("ILS", "\u{20aa}", 2),
    ("IMP", "\u{a3}", 2), ("INR", "\u{20b9}", 2), ("IQD", "\u{639}.\u{62f}", 3), ("IRR", "\u{fdfc}", 2),
    ("ISK", "kr", 0), ("JEP", "\u{a3}", 2), ("JMD", "J$", 2), ("JOD", "\u{62f}.\u{627}", 3),
    ("JPY", "\u{a5}", 0), ("KES", "KSh", 2), ("KGS", "\u{441}\u{43e}\u{43c}", 2), ("KHR", "\u{17db}", 2),
    ("KMF", "CF", 0), ("KPW", "\u{20a9}", 2), ("KRW", "\u{20a9}", 0), ("KWD", "\u{62f}.\u{643}", 3),
    ("KYD", "$", 2), ("KZT", "\u{20b8}", 2), ("LAK", "\u{20ad}", 2), ("LBP", "\u{a3}", 2),
    ("LKR", "\u{20a8}", 2), ("LRD", "$", 2), ("LSL", "L", 2), ("LYD", "\u{644}.\u{62f}", 3),
    ("MAD", "\u{62f}.\u{645}.", 2), ("MDL", "lei", 2), ("MGA", "Ar", 2), ("MKD", "\u{434}\u{435}\u{43d}", 2),
    ("MMK", "K", 2), ("MNT", "\u{20ae}", 2), ("MOP", "P", 2), ("MRU", "UM", 2),
    ("MUR", "\u{20a8}", 2), ("MVR", "MVR", 2), ("MWK", "MK", 2), ("MXN", "$", 2),
    ("MYR", "RM", 2), ("MZN", "MT", 2), ("NAD", "$", 2), ("NGN", "\u{20a6}", 2),
    ("NIO", "C$", 2), ("NOK", "kr", 2), ("NPR", "\u{20a8}", 2), ("NZD", "$", 2),
    ("OMR", "\u{fdfc}", 3), ("PAB", "B/.", 2), ("PEN", "S/", 2), ("PGK", "K", 2),
    ("PHP", "\u{20b1}", 2), ("PKR", "\u{20a8}", 2), ("PLN", "z\u{142}", 2), ("PYG", "\u{20b2}", 0),
    ("QAR", "\u{fdfc}", 2), ("RON", "lei", 2), ("RSD", "\u{414}\u{438}\u{43d}.", 2), ("RUB", "\u{20bd}", 2),
    ("RWF", "FRw", 0), ("SAR", "\u{fdfc}", 2), ("SBD", "$", 2), ("SCR", "\u{20a8}", 2),
    ("SDG", "\u{a3}", 2), ("SEK", "kr", 2), ("SGD", "$", 2), ("SHP", "\u{a3}", 2),
    ("SLE", "Le", 2), ("SOS", "S", 2), ("SRD", "$", 2), ("SSP", "\u{a3}", 2),
    ("STN", "Db", 2), ("SVC", "$", 2), ("SYP", "\u{a3}", 2), ("SZL", "E", 2),
    ("THB", "\u{e3f}", 2), ("TJS", "SM", 2), ("TMT", "T", 2), ("TND", "\u{62f}.\u{62a}", 3),
    ("TOP", "T$", 2), ("TRY", "\u{20ba}", 2), ("TTD", "TT$", 2), ("TWD", "NT$", 2),
    ("TZS", "TSh", 2), ("UAH", "\u{20b4}", 2), ("UGX", "USh", 0), ("USD", "$", 2),
    ("UYU", "$U", 2), ("UZS", "so\u{2bb}m", 2), ("VES", "Bs.S", 2), ("VND", "\u{20ab}", 0),
    ("VUV", "Vt", 0), ("WST", "T", 2), ("XAF", "FCFA", 0), ("XAG", "XAG", 4),
    ("XAU", "XAU", 4), ("XCD", "$", 2), ("XOF", "CFA", 0), ("XPF", "\u{20a3}", 0),
    ("YER", "\u{fdfc}", 2), ("ZAR", "R", 2), ("ZMW", "ZK", 2), ("ZWL", "Z$", 2),
];

/// Codes missing from ISO 4217 that upstream quote services and the fixed
/// crypto table rely on.
const EXTENDED: &[(&str, &str, u32)] = &[
    ("BTC", "\u{20bf}", 8),
    ("CNH", "\u{a5}", 2),
    ("XPD", "XPD", 2),
    ("XPT", "XPT", 2),
    ("BEER", "BEER", 18),
    ("FLOKI", "FLOKI", 18),
    ("GATE", "GATE", 18),
    ("USDT", "USDT", 6),
    ("WBTC", "WBTC", 8),
];

/// Read-only lookup table of known currencies.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: HashMap<String, Currency>,
}

impl CurrencyRegistry {
    /// Start an empty registry builder.
    pub fn builder() -> CurrencyRegistryBuilder {
        CurrencyRegistryBuilder::default()
    }

    /// Registry with the ISO 4217 table plus the extended crypto/metal codes.
    pub fn with_defaults() -> Self {
        Self::builder().with_iso_4217().with_extended().build()
    }

    /// Look up a currency by its exact (case-sensitive) code.
    pub fn lookup(&self, code: &str) -> Option<Currency> {
        self.currencies.get(code).cloned()
    }

    /// Check whether a code is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    /// Number of registered currencies.
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

/// Builder for [`CurrencyRegistry`]. Consumed by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CurrencyRegistryBuilder {
    currencies: HashMap<String, Currency>,
}

impl CurrencyRegistryBuilder {
    /// Add the built-in ISO 4217 table.
    pub fn with_iso_4217(mut self) -> Self {
        self.insert_table(ISO_4217);
        self
    }

    /// Add the built-in non-standard codes, replacing ISO entries with the
    /// same code.
    pub fn with_extended(mut self) -> Self {
        self.insert_table(EXTENDED);
        self
    }

    /// Register a single currency.
    pub fn register(
        mut self,
        code: &str,
        symbol: &str,
        minor_units: u32,
    ) -> Result<Self, RegistryError> {
        let valid = !code.is_empty()
            && code.len() <= MAX_CODE_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !valid {
            return Err(RegistryError::InvalidCode(code.to_string()));
        }

        if minor_units > Decimal::MAX_SCALE {
            return Err(RegistryError::TooManyMinorUnits {
                code: code.to_string(),
                minor_units,
                max: Decimal::MAX_SCALE,
            });
        }

        if self.currencies.contains_key(code) {
            return Err(RegistryError::Duplicate(code.to_string()));
        }

        self.currencies
            .insert(code.to_string(), Currency::new(code, symbol, minor_units));
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> CurrencyRegistry {
        CurrencyRegistry {
            currencies: self.currencies,
        }
    }

    fn insert_table(&mut self, table: &[(&str, &str, u32)]) {
        for &(code, symbol, minor_units) in table {
            self.currencies
                .insert(code.to_string(), Currency::new(code, symbol, minor_units));
        }
    }
}
