use std::collections::HashMap;

use crate::network::Network;

/// Read-only IATA code to country lookup, built once alongside the network.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    countries: HashMap<String, String>,
}

impl CountryIndex {
    pub fn from_network(network: &Network) -> Self {
        let countries = network
            .airports()
            .iter()
            .filter(|airport| !airport.country.trim().is_empty())
            .map(|airport| (airport.iata.clone(), airport.country.clone()))
            .collect();
        Self { countries }
    }

    /// Country of an airport; `None` for unknown codes or blank countries.
    pub fn country_of(&self, code: &str) -> Option<&str> {
        self.countries
            .get(code)
            .or_else(|| self.countries.get(&code.trim().to_ascii_uppercase()))
            .map(String::as_str)
    }

    /// Classify a one-stop transfer at `hub` between `source` and `target`.
    ///
    /// The transfer is international when all three countries are known and
    /// the source differs from the hub OR the hub differs from the target.
    /// Unknown countries classify as domestic.
    pub fn is_international_transfer(&self, source: &str, hub: &str, target: &str) -> bool {
        match (
            self.country_of(source),
            self.country_of(hub),
            self.country_of(target),
        ) {
            (Some(from), Some(via), Some(to)) => from != via || via != to,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::network::Airport;

    fn airport(iata: &str, country: &str) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: iata.to_string(),
            city: iata.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
        }
    }

    fn index() -> CountryIndex {
        let network = Network::build(
            vec![
                airport("LHR", "United Kingdom"),
                airport("MAN", "United Kingdom"),
                airport("CDG", "France"),
                airport("XXX", ""),
            ],
            &[],
            &EngineConfig::default(),
        );
        CountryIndex::from_network(&network)
    }

    #[test]
    fn looks_up_countries() {
        let index = index();
        assert_eq!(index.country_of("LHR"), Some("United Kingdom"));
        assert_eq!(index.country_of("cdg"), Some("France"));
        assert_eq!(index.country_of("XXX"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn any_border_crossing_is_international() {
        let index = index();
        assert!(!index.is_international_transfer("LHR", "MAN", "LHR"));
        assert!(index.is_international_transfer("LHR", "CDG", "MAN"));
        assert!(index.is_international_transfer("LHR", "MAN", "CDG"));
        assert!(index.is_international_transfer("CDG", "LHR", "MAN"));
    }

    #[test]
    fn unknown_country_is_domestic() {
        let index = index();
        assert!(!index.is_international_transfer("LHR", "XXX", "CDG"));
    }
}
