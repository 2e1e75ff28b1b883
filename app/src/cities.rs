//! City catalog for the location picker.

/// City selected when nothing else is configured
pub const DEFAULT_CITY: &str = "Bengaluru";

/// Cities venues can be listed under
pub const CITIES: [&str; 54] = [
    "Chennai",
    "Coimbatore",
    "Madurai",
    "Tiruchirappalli",
    "Salem",
    "Tirunelveli",
    "Erode",
    "Vellore",
    "Thoothukudi",
    "Dindigul",
    "Thanjavur",
    "Ranipet",
    "Sivakasi",
    "Karur",
    "Udhagamandalam",
    "Hosur",
    "Nagercoil",
    "Kanchipuram",
    "Kumarapalayam",
    "Karaikkudi",
    "Neyveli",
    "Cuddalore",
    "Kumbakonam",
    "Tiruppur",
    "Pollachi",
    "Rajapalayam",
    "Gudiyatham",
    "Pudukkottai",
    "Vaniyambadi",
    "Ambur",
    "Nagapattinam",
    "Viluppuram",
    "Tindivanam",
    "Virudhunagar",
    "Aruppukkottai",
    "Paramakudi",
    "Ramanathapuram",
    "Sirkali",
    "Mayiladuthurai",
    "Chidambaram",
    "Kallakurichi",
    "Perambalur",
    "Ariyalur",
    "Krishnagiri",
    "Dharmapuri",
    "Namakkal",
    "Theni",
    "Tenkasi",
    "Chengalpattu",
    "Tiruvallur",
    "Tiruvannamalai",
    "Kovilpatti",
    "Srivilliputhur",
    DEFAULT_CITY,
];

/// Catalog cities containing `query`, ignoring case; all of them for a blank query
#[must_use]
pub fn search(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    CITIES
        .into_iter()
        .filter(|city| city.to_lowercase().contains(&query))
        .collect()
}

/// Catalog spelling of `name`, if it is a known city
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CITIES
        .into_iter()
        .find(|city| city.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fifty_four_unique_cities() {
        let mut sorted = CITIES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 54);
        assert!(CITIES.contains(&DEFAULT_CITY));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert_eq!(
            search("PUR"),
            vec!["Kanchipuram", "Tiruppur", "Viluppuram", "Ramanathapuram", "Dharmapuri"]
        );
        assert!(search("kumba").contains(&"Kumbakonam"));
        assert_eq!(search("").len(), 54);
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn lookup_normalises_spelling() {
        assert_eq!(lookup("  chennai "), Some("Chennai"));
        assert_eq!(lookup("Atlantis"), None);
    }
}
