//! Mapping of free-text addresses onto a fixed list of known regions.
//!
//! Matching is a plain, case-sensitive substring test and the first region
//! in list order wins. An address that names two regions is therefore
//! resolved by list position, not by the longest or most specific match.

/// Catch-all bucket for addresses that name no known region.
pub const OTHER_REGION: &str = "Otros";

/// Known regions, in matching order.
pub const DEFAULT_REGIONS: &[&str] = &[
    "Lima",
    "Arequipa",
    "Cusco",
    "La Libertad",
    "Piura",
    "Lambayeque",
    "Junín",
    "Callao",
    "Cajamarca",
    "Puno",
    "Áncash",
    "Ica",
    "Loreto",
    "San Martín",
    "Tacna",
    "Ayacucho",
    "Huánuco",
    "Ucayali",
    "Apurímac",
    "Amazonas",
    "Huancavelica",
    "Moquegua",
    "Pasco",
    "Tumbes",
    "Madre de Dios",
];

/// Resolve `address` to the first region in `regions` it contains, or
/// [`OTHER_REGION`] when none does.
pub fn resolve_region<'a, S: AsRef<str>>(address: &str, regions: &'a [S]) -> &'a str {
    regions
        .iter()
        .map(|region| region.as_ref())
        .find(|region| !region.is_empty() && address.contains(*region))
        .unwrap_or(OTHER_REGION)
}

/// Owned copy of [`DEFAULT_REGIONS`], handy for configuration defaults.
pub fn default_regions() -> Vec<String> {
    DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_region_named_in_address() {
        assert_eq!(resolve_region("Av. Ejército 101, Arequipa", DEFAULT_REGIONS), "Arequipa");
    }

    #[test]
    fn unknown_and_empty_addresses_fall_back_to_other() {
        assert_eq!(resolve_region("Calle Falsa 123, Springfield", DEFAULT_REGIONS), OTHER_REGION);
        assert_eq!(resolve_region("", DEFAULT_REGIONS), OTHER_REGION);
    }

    #[test]
    fn first_listed_region_wins_on_ambiguous_address() {
        let regions = ["Lima", "Callao"];
        assert_eq!(resolve_region("Jr. Callao 200, Lima", &regions[..]), "Lima");

        let reversed = ["Callao", "Lima"];
        assert_eq!(resolve_region("Jr. Callao 200, Lima", &reversed[..]), "Callao");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(resolve_region("av. grau, lima", DEFAULT_REGIONS), OTHER_REGION);
    }

    #[test]
    fn empty_region_names_never_match() {
        let regions = vec![String::new(), "Cusco".to_string()];
        assert_eq!(resolve_region("Plaza de Armas, Cusco", regions.as_slice()), "Cusco");
        assert_eq!(resolve_region("Anywhere", regions.as_slice()), OTHER_REGION);
    }
}
