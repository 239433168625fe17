// crates/citycompare-core/src/providers/wikidata.rs

//! Wikidata SPARQL: most recent population statement (P1082) of an entity.

use crate::error::ProviderError;
use serde::Deserialize;

#[cfg(feature = "http")]
use super::{absent_on_error, HttpClient, PopulationSource};

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<PopulationBinding>,
}

#[derive(Debug, Deserialize)]
struct PopulationBinding {
    #[serde(default)]
    population: Option<SparqlValue>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

/// `Q` followed by digits; anything else never reaches the query text.
pub fn is_entity_id(id: &str) -> bool {
    id.len() > 1 && id.starts_with('Q') && id[1..].bytes().all(|b| b.is_ascii_digit())
}

/// SPARQL selecting the population with the latest point-in-time qualifier.
///
/// Statements without a date sort last, so a dated figure always wins.
pub fn population_query(entity_id: &str) -> String {
    format!(
        "SELECT ?population ?date WHERE {{\n  \
           wd:{entity_id} p:P1082 ?statement.\n  \
           ?statement ps:P1082 ?population.\n  \
           OPTIONAL {{ ?statement pq:P585 ?date. }}\n\
         }}\n\
         ORDER BY DESC(?date)\n\
         LIMIT 1"
    )
}

/// First binding's population, if any. The query already orders by date.
pub fn parse_population(body: &str) -> Result<Option<u64>, ProviderError> {
    let response: SparqlResponse = serde_json::from_str(body)?;
    let Some(raw) = response
        .results
        .bindings
        .into_iter()
        .find_map(|b| b.population)
    else {
        return Ok(None);
    };
    let value = super::parse_number(&raw.value)
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| ProviderError::Malformed(format!("population {:?}", raw.value)))?;
    Ok(Some(value.round() as u64))
}

#[cfg(feature = "http")]
pub struct Wikidata {
    http: HttpClient,
    sparql_url: String,
}

#[cfg(feature = "http")]
impl Wikidata {
    pub fn new(http: HttpClient, sparql_url: &str) -> Self {
        Self {
            http,
            sparql_url: sparql_url.to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl PopulationSource for Wikidata {
    fn population_of(&self, wikidata_id: &str) -> Option<u64> {
        if !is_entity_id(wikidata_id) {
            tracing::warn!(wikidata_id, "not a Wikidata entity id, skipping population");
            return None;
        }
        let query = [
            ("query", population_query(wikidata_id)),
            ("format", "json".to_string()),
        ];
        let result = self
            .http
            .get_text(&self.sparql_url, &query)
            .and_then(|body| parse_population(&body));
        absent_on_error("wikidata", result)
    }
}
