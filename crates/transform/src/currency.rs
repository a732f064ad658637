//! ISO 4217 alphabetic currency codes.

use std::sync::LazyLock;

use crate::membership::CodeSet;

const ISO_4217: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD",
    "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUC", "CUP",
    "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP",
    "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR",
    "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW",
    "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA",
    "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD",
    "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG",
    "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE",
    "SLL", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP",
    "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED",
    "VES", "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XDR",
    "XOF", "XPD", "XPF", "XPT", "XSU", "XTS", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWL",
];

/// Accepted ISO 4217 currency codes (upper-case, exact match).
pub static CURRENCY_ISO_CODES: LazyLock<CodeSet> =
    LazyLock::new(|| CodeSet::new("ISO 4217 currency codes", ISO_4217));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_codes_are_members() {
        for code in ["USD", "EUR", "GBP", "JPY", "BRL"] {
            assert!(CURRENCY_ISO_CODES.contains(code), "{code} should be accepted");
        }
    }

    #[test]
    fn lowercase_and_unknown_codes_rejected() {
        assert!(!CURRENCY_ISO_CODES.contains("usd"));
        assert!(!CURRENCY_ISO_CODES.contains("ABC"));
        assert!(!CURRENCY_ISO_CODES.contains("US"));
    }

    #[test]
    fn codes_are_unique_three_letter_upper_case() {
        assert_eq!(CURRENCY_ISO_CODES.len(), ISO_4217.len());
        for code in ISO_4217 {
            assert_eq!(code.len(), 3);
            assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }
}
