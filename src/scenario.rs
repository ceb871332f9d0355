use std::convert::TryFrom;
use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::disjoint_set::DisjointSet;
use crate::error::ScenarioError;

/// A query run against the set once every union has been applied. Indices
/// are kept signed until the set itself validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Find(i64),
    SizeOf(i64),
    Connected(i64, i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Bool(bool),
    Count(usize),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Answer::Bool(b) => write!(f, "{}", b),
            Answer::Count(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub capacity: usize,
    pub unions: Vec<(i64, i64)>,
    pub queries: Vec<Query>,
}

impl Scenario {
    /// Seven elements, three unions, three queries.
    pub fn builtin() -> Scenario {
        Scenario {
            capacity: 7,
            unions: vec![(0, 1), (1, 4), (0, 5)],
            queries: vec![Query::Connected(0, 4), Query::Connected(0, 6), Query::SizeOf(0)],
        }
    }

    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let text = fs::read_to_string(path)?;
        info!("loaded scenario from {}", path.display());
        Scenario::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Scenario, ScenarioError> {
        let doc: Value = serde_json::from_str(text)?;
        Scenario::from_value(&doc)
    }

    pub fn from_value(doc: &Value) -> Result<Scenario, ScenarioError> {
        if !doc.is_object() {
            return Err(ScenarioError::malformed("top level must be an object"));
        }

        let raw_capacity = doc["capacity"].as_i64()
            .ok_or_else(|| ScenarioError::malformed("capacity must be an integer"))?;
        if raw_capacity < 0 {
            return Err(ScenarioError::NegativeCapacity(raw_capacity));
        }
        let capacity = usize::try_from(raw_capacity)
            .map_err(|_| ScenarioError::malformed("capacity does not fit in memory"))?;

        let unions = list(doc, "unions")?.iter()
            .map(|pair| index_pair(pair, "union"))
            .collect::<Result<Vec<_>, _>>()?;
        let queries = list(doc, "queries")?.iter()
            .map(parse_query)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scenario { capacity, unions, queries })
    }

    /// Applies every union in order, then answers every query in order.
    pub fn run(&self) -> Result<Vec<Answer>, ScenarioError> {
        let mut set = DisjointSet::new(self.capacity);
        info!("running scenario: capacity {}, {} unions, {} queries",
            self.capacity, self.unions.len(), self.queries.len());

        for &(a, b) in &self.unions {
            let a = set.element(a)?;
            let b = set.element(b)?;
            set.union(a, b)?;
        }
        info!("{} sets after unions: {:?}", set.set_count(), set.sets());

        let mut answers = Vec::with_capacity(self.queries.len());
        for query in &self.queries {
            let answer = match *query {
                Query::Find(e) => {
                    let e = set.element(e)?;
                    Answer::Count(set.find(e)?)
                }
                Query::SizeOf(e) => {
                    let e = set.element(e)?;
                    Answer::Count(set.size_of(e)?)
                }
                Query::Connected(a, b) => {
                    let a = set.element(a)?;
                    let b = set.element(b)?;
                    Answer::Bool(set.connected(a, b)?)
                }
            };
            debug!("{:?} -> {}", query, answer);
            answers.push(answer);
        }
        Ok(answers)
    }
}

// Missing or null lists count as empty.
fn list<'a>(doc: &'a Value, key: &str) -> Result<&'a [Value], ScenarioError> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ScenarioError::malformed(format!("{} must be an array", key))),
    }
}

fn index(value: &Value, what: &str) -> Result<i64, ScenarioError> {
    value.as_i64()
        .ok_or_else(|| ScenarioError::malformed(format!("{} index must be an integer, got {}", what, value)))
}

fn index_pair(value: &Value, what: &str) -> Result<(i64, i64), ScenarioError> {
    match value.as_array().map(Vec::as_slice) {
        Some([a, b]) => Ok((index(a, what)?, index(b, what)?)),
        _ => Err(ScenarioError::malformed(format!("{} must be a pair of indices, got {}", what, value))),
    }
}

fn parse_query(value: &Value) -> Result<Query, ScenarioError> {
    let fields = value.as_object()
        .filter(|fields| fields.len() == 1)
        .ok_or_else(|| ScenarioError::malformed(format!("query must be an object with one key, got {}", value)))?;

    match fields.iter().next() {
        Some((name, arg)) if name == "find" => Ok(Query::Find(index(arg, name)?)),
        Some((name, arg)) if name == "size_of" => Ok(Query::SizeOf(index(arg, name)?)),
        Some((name, arg)) if name == "connected" => {
            let (a, b) = index_pair(arg, name)?;
            Ok(Query::Connected(a, b))
        }
        Some((name, _)) => Err(ScenarioError::malformed(format!("unknown query {}", name))),
        None => Err(ScenarioError::malformed("empty query")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DisjointSetError;

    #[test]
    fn builtin_scenario_answers() {
        let answers = Scenario::builtin().run().unwrap();
        assert_eq!(answers, vec![Answer::Bool(true), Answer::Bool(false), Answer::Count(4)]);
        let printed: Vec<String> = answers.iter().map(|a| a.to_string()).collect();
        assert_eq!(printed, vec!["true", "false", "4"]);
    }

    #[test]
    fn parses_full_document() {
        let scenario = Scenario::from_json(r#"{
            "capacity": 7,
            "unions": [[0, 1], [1, 4], [0, 5]],
            "queries": [{"connected": [0, 4]}, {"connected": [0, 6]}, {"size_of": 0}, {"find": 6}]
        }"#).unwrap();
        assert_eq!(scenario.capacity, 7);
        assert_eq!(scenario.unions, Scenario::builtin().unions);
        assert_eq!(scenario.queries[3], Query::Find(6));
        assert_eq!(scenario.run().unwrap()[3], Answer::Count(6));
    }

    #[test]
    fn lists_default_to_empty() {
        let scenario = Scenario::from_json(r#"{"capacity": 0, "unions": null}"#).unwrap();
        assert_eq!(scenario, Scenario { capacity: 0, unions: vec![], queries: vec![] });
        assert!(scenario.run().unwrap().is_empty());
    }

    #[test]
    fn negative_capacity_is_its_own_error() {
        match Scenario::from_json(r#"{"capacity": -3}"#) {
            Err(ScenarioError::NegativeCapacity(-3)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_documents() {
        let bad = [
            "[]",
            r#"{}"#,
            r#"{"capacity": "7"}"#,
            r#"{"capacity": 3, "unions": [[0]]}"#,
            r#"{"capacity": 3, "unions": [[0, 1.5]]}"#,
            r#"{"capacity": 3, "unions": {"0": 1}}"#,
            r#"{"capacity": 3, "queries": [{"find": 0, "size_of": 1}]}"#,
            r#"{"capacity": 3, "queries": [{"parent": 0}]}"#,
        ];
        for text in bad.iter() {
            match Scenario::from_json(text) {
                Err(ScenarioError::Malformed { .. }) => {}
                other => panic!("{} gave {:?}", text, other),
            }
        }
        match Scenario::from_json("{") {
            Err(ScenarioError::Json(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_indices_surface_as_out_of_range() {
        let scenario = Scenario::from_json(r#"{"capacity": 3, "unions": [[-1, 0]]}"#).unwrap();
        match scenario.run() {
            Err(ScenarioError::DisjointSet(DisjointSetError::OutOfRange { index: -1, capacity: 3 })) => {}
            other => panic!("unexpected {:?}", other),
        }

        let scenario = Scenario::from_json(r#"{"capacity": 3, "queries": [{"size_of": 3}]}"#).unwrap();
        match scenario.run() {
            Err(ScenarioError::DisjointSet(DisjointSetError::OutOfRange { index: 3, capacity: 3 })) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
