//! OpenFlights dataset ingestion.
//!
//! Both `airports.dat` and `routes.dat` are headerless CSV files that use
//! `\N` for missing values. Rows that cannot be used are skipped and counted;
//! only I/O failures and missing files are fatal.

use std::collections::HashSet;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::network::{Airport, Network, RouteRecord};

pub const AIRPORTS_FILE: &str = "airports.dat";
pub const ROUTES_FILE: &str = "routes.dat";

/// Environment variable consulted when no data directory is given explicitly.
pub const DATA_DIR_ENV: &str = "FLIGHTNET_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

const NULL: &str = "\\N";
const UNKNOWN_AIRLINE: &str = "N/A";

// airports.dat columns
const AIRPORT_NAME: usize = 1;
const AIRPORT_CITY: usize = 2;
const AIRPORT_COUNTRY: usize = 3;
const AIRPORT_IATA: usize = 4;
const AIRPORT_LATITUDE: usize = 6;
const AIRPORT_LONGITUDE: usize = 7;
const AIRPORT_ALTITUDE: usize = 8;

// routes.dat columns
const ROUTE_AIRLINE: usize = 0;
const ROUTE_SOURCE: usize = 2;
const ROUTE_DESTINATION: usize = 4;
const ROUTE_STOPS: usize = 7;

/// Airport and route records ready for [`Network::build`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub airports: Vec<Airport>,
    pub routes: Vec<RouteRecord>,
}

impl Dataset {
    /// Parse both files from in-memory readers.
    pub fn from_readers<A: Read, R: Read>(airports: A, routes: R) -> Result<Self> {
        Ok(Self {
            airports: read_airports(airports)?,
            routes: read_routes(routes)?,
        })
    }

    pub fn into_network(self, config: &EngineConfig) -> Network {
        Network::build(self.airports, &self.routes, config)
    }
}

/// Pick the dataset directory: explicit path, then `FLIGHTNET_DATA_DIR`, then
/// `./data`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var(DATA_DIR_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Load `airports.dat` and `routes.dat` from `dir`.
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    let airports_path = dir.join(AIRPORTS_FILE);
    let routes_path = dir.join(ROUTES_FILE);

    let airports = read_airports(open(&airports_path)?)?;
    let routes = read_routes(open(&routes_path)?)?;
    info!(
        dir = %dir.display(),
        airports = airports.len(),
        routes = routes.len(),
        "loaded OpenFlights dataset"
    );
    Ok(Dataset { airports, routes })
}

fn open(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(source)
}

/// Read the next record, skipping rows the CSV layer rejects.
///
/// Returns `Ok(false)` at end of input; I/O errors are propagated.
fn next_record<R: Read>(
    reader: &mut csv::Reader<R>,
    record: &mut StringRecord,
    skipped: &mut usize,
) -> Result<bool> {
    loop {
        match reader.read_record(record) {
            Ok(more) => return Ok(more),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(error = %err, "skipping malformed row");
                *skipped += 1;
            }
        }
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize) -> Option<&'r str> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != NULL)
}

fn text(record: &StringRecord, idx: usize) -> String {
    field(record, idx).unwrap_or_default().to_string()
}

fn iata(record: &StringRecord, idx: usize) -> Option<String> {
    field(record, idx)
        .filter(|code| code.chars().count() == 3)
        .map(str::to_ascii_uppercase)
}

/// Parse OpenFlights airport rows, keeping those with a usable IATA code and
/// coordinates. The first row for a repeated code wins.
pub fn read_airports<R: Read>(source: R) -> Result<Vec<Airport>> {
    let mut reader = reader(source);
    let mut record = StringRecord::new();
    let mut seen = HashSet::new();
    let mut airports = Vec::new();
    let mut skipped = 0usize;

    while next_record(&mut reader, &mut record, &mut skipped)? {
        let Some(code) = iata(&record, AIRPORT_IATA) else {
            skipped += 1;
            continue;
        };
        let latitude = field(&record, AIRPORT_LATITUDE).and_then(|v| v.parse::<f64>().ok());
        let longitude = field(&record, AIRPORT_LONGITUDE).and_then(|v| v.parse::<f64>().ok());
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            skipped += 1;
            continue;
        };
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            skipped += 1;
            continue;
        }
        if !seen.insert(code.clone()) {
            skipped += 1;
            continue;
        }

        airports.push(Airport {
            iata: code,
            name: text(&record, AIRPORT_NAME),
            city: text(&record, AIRPORT_CITY),
            country: text(&record, AIRPORT_COUNTRY),
            latitude,
            longitude,
            altitude: field(&record, AIRPORT_ALTITUDE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
        });
    }

    debug!(kept = airports.len(), skipped, "parsed airports");
    Ok(airports)
}

/// Parse OpenFlights route rows, keeping direct flights between 3-letter
/// IATA codes.
pub fn read_routes<R: Read>(source: R) -> Result<Vec<RouteRecord>> {
    let mut reader = reader(source);
    let mut record = StringRecord::new();
    let mut routes = Vec::new();
    let mut skipped = 0usize;

    while next_record(&mut reader, &mut record, &mut skipped)? {
        let direct = field(&record, ROUTE_STOPS)
            .and_then(|v| v.parse::<u32>().ok())
            .is_some_and(|stops| stops == 0);
        if !direct {
            skipped += 1;
            continue;
        }
        let (Some(source), Some(destination)) =
            (iata(&record, ROUTE_SOURCE), iata(&record, ROUTE_DESTINATION))
        else {
            skipped += 1;
            continue;
        };
        let airline = field(&record, ROUTE_AIRLINE).unwrap_or(UNKNOWN_AIRLINE);
        routes.push(RouteRecord::new(source, destination, airline));
    }

    debug!(kept = routes.len(), skipped, "parsed routes");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const AIRPORTS: &str = r#"507,"London Heathrow Airport","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports"
1382,"Charles de Gaulle International Airport","Paris","France","cdg","LFPG",49.012798,2.55,392,1,"E","Europe/Paris","airport","OurAirports"
9999,"No Code Field","Nowhere","Nowhere",\N,"XXXX",10.0,10.0,0,0,"U",\N,"airport","OurAirports"
9998,"Four Letter","Nowhere","Nowhere","ABCD","XXXX",10.0,10.0,0,0,"U",\N,"airport","OurAirports"
9997,"Broken Coordinates","Nowhere","Nowhere","BRK","XXXX",north,10.0,0,0,"U",\N,"airport","OurAirports"
9996,"Heathrow Again","London","United Kingdom","LHR","EGLL",0.0,0.0,0,0,"E",\N,"airport","OurAirports"
3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,\N,-5,"A","America/New_York","airport","OurAirports"
"#;

    const ROUTES: &str = r#"BA,1355,LHR,507,JFK,3797,,0,777
AF,137,CDG,1382,JFK,3797,,0,388
\N,\N,jfk,3797,lhr,507,,0,744
XX,1,LHR,507,JFK,3797,,1,777
XX,1,LHR,507,\N,\N,,0,777
XX,1,EGLL,507,JFK,3797,,0,777
XX,1,LHR,507
"#;

    #[test]
    fn airports_keep_valid_iata_rows() {
        let airports = read_airports(Cursor::new(AIRPORTS)).unwrap();
        let codes: Vec<&str> = airports.iter().map(|a| a.iata.as_str()).collect();
        assert_eq!(codes, vec!["LHR", "CDG", "JFK"]);

        let lhr = &airports[0];
        assert_eq!(lhr.name, "London Heathrow Airport");
        assert_eq!(lhr.country, "United Kingdom");
        assert!((lhr.latitude - 51.4706).abs() < 1e-9);
        assert_eq!(lhr.altitude, 83.0);
        assert_eq!(airports[2].altitude, 0.0);
    }

    #[test]
    fn routes_keep_direct_flights_only() {
        let routes = read_routes(Cursor::new(ROUTES)).unwrap();
        assert_eq!(
            routes,
            vec![
                RouteRecord::new("LHR", "JFK", "BA"),
                RouteRecord::new("CDG", "JFK", "AF"),
                RouteRecord::new("JFK", "LHR", "N/A"),
            ]
        );
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { ref path } if path.ends_with(AIRPORTS_FILE)));
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(AIRPORTS_FILE), AIRPORTS).unwrap();
        std::fs::write(dir.path().join(ROUTES_FILE), ROUTES).unwrap();

        let network = load_dataset(dir.path())
            .unwrap()
            .into_network(&EngineConfig::default());
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.edge("JFK", "LHR").unwrap().airline, "N/A");
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/flights")));
        assert_eq!(dir, PathBuf::from("/tmp/flights"));
    }
}
