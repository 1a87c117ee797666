//! Conditional queries and their evaluation.
//!
//! A [`Query`] asks for P(targets | evidence). [`QueryEvaluator`] answers it as the ratio of
//! two enumerations: the mass of targets and evidence together over the mass of the evidence
//! alone.
//!
//! Queries can be written as text, `TARGETS[|EVIDENCE]`, each side a comma separated list of
//! `NAME=VALUE` pairs with `T`/`F` (or `TRUE`/`FALSE`) values:
//!
//! ```rust
//! use bayesnet_core::{network::sample::sprinkler, query::QueryEvaluator};
//!
//! let network = sprinkler().unwrap();
//! let evaluator = QueryEvaluator::new(&network);
//! assert_eq!(evaluator.evaluate_str("S=T | W=T").unwrap(), 0.75);
//! assert_eq!(evaluator.evaluate(&[("W", true)], &[]).unwrap(), 0.6);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    assignment::{Assignment, AssignmentSet, TruthValue},
    config::EngineConfig,
    enumeration::EnumerationSolver,
    error::InferenceError,
    network::Network,
};

static ASSIGNMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^=,|]+)=(?P<value>[^=,|]*)$")
        .expect("assignment pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub targets: Vec<Assignment>,
    pub evidence: Vec<Assignment>,
}

impl Query {
    pub fn new(targets: Vec<Assignment>, evidence: Vec<Assignment>) -> Self {
        Query { targets, evidence }
    }

    pub fn from_pairs(targets: &[(&str, bool)], evidence: &[(&str, bool)]) -> Self {
        let observe = |pairs: &[(&str, bool)]| {
            pairs
                .iter()
                .map(|(name, value)| Assignment::observed(*name, *value))
                .collect::<Vec<_>>()
        };
        Query::new(observe(targets), observe(evidence))
    }

    /// Targets followed by evidence.
    pub fn joint(&self) -> Vec<Assignment> {
        self.targets
            .iter()
            .chain(self.evidence.iter())
            .cloned()
            .collect()
    }

    fn parse_side(side: &str) -> Result<Vec<Assignment>, InferenceError> {
        if side.is_empty() {
            return Ok(Vec::new());
        }
        side.split(',')
            .map(|part| -> Result<Assignment, InferenceError> {
                let captures = ASSIGNMENT_PATTERN.captures(part).ok_or_else(|| {
                    InferenceError::QuerySyntax(format!("expected NAME=VALUE, got '{part}'"))
                })?;
                let name = &captures["name"];
                let value = TruthValue::parse_token(name, &captures["value"])?;
                Ok(Assignment::observed(name, value))
            })
            .collect()
    }
}

impl FromStr for Query {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact = s.split_whitespace().collect::<String>();
        let mut sides = compact.split('|');
        let targets = Query::parse_side(sides.next().unwrap_or_default())?;
        let evidence = Query::parse_side(sides.next().unwrap_or_default())?;
        if sides.next().is_some() {
            return Err(InferenceError::QuerySyntax(format!(
                "more than one '|' in '{s}'"
            )));
        }
        if targets.is_empty() {
            return Err(InferenceError::QuerySyntax(format!(
                "no target variables in '{s}'"
            )));
        }
        Ok(Query::new(targets, evidence))
    }
}

fn join(assignments: &[Assignment]) -> String {
    assignments
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join(&self.targets))?;
        if !self.evidence.is_empty() {
            write!(f, "|{}", join(&self.evidence))?;
        }
        Ok(())
    }
}

/// Both enumerations behind an answered query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub query: String,
    pub numerator: f64,
    pub denominator: f64,
    pub probability: f64,
}

/// Answers conditional queries against one network.
///
/// Evaluators hold no mutable state, so any number of them may query the same network at
/// once.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    solver: EnumerationSolver<'a>,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(network: &'a Network) -> Self {
        QueryEvaluator::with_config(network, EngineConfig::default())
    }

    pub fn with_config(network: &'a Network, config: EngineConfig) -> Self {
        QueryEvaluator {
            solver: EnumerationSolver::with_config(network, config),
        }
    }

    pub fn network(&self) -> &'a Network {
        self.solver.network()
    }

    /// P(targets | evidence).
    pub fn evaluate(
        &self,
        targets: &[(&str, bool)],
        evidence: &[(&str, bool)],
    ) -> Result<f64, InferenceError> {
        self.evaluate_query(&Query::from_pairs(targets, evidence))
    }

    pub fn evaluate_str(&self, query: &str) -> Result<f64, InferenceError> {
        self.evaluate_query(&query.parse()?)
    }

    pub fn evaluate_query(&self, query: &Query) -> Result<f64, InferenceError> {
        self.evaluate_detailed(query).map(|outcome| outcome.probability)
    }

    #[tracing::instrument(skip_all, fields(query = %query))]
    pub fn evaluate_detailed(&self, query: &Query) -> Result<QueryOutcome, InferenceError> {
        let network = self.solver.network();
        let numerator_set = AssignmentSet::closure(network, &query.joint())?;
        let denominator_set = AssignmentSet::closure(network, &query.evidence)?;
        tracing::debug!(
            "numerator closure {}, denominator closure {}",
            numerator_set,
            denominator_set
        );

        let numerator = self.solver.enumerate_all(&numerator_set)?;
        let denominator = self.solver.enumerate_all(&denominator_set)?;
        if denominator == 0.0 {
            return Err(InferenceError::DivisionUndefined {
                evidence: join(&query.evidence),
            });
        }

        let probability = numerator / denominator;
        tracing::debug!("{} / {} = {}", numerator, denominator, probability);
        Ok(QueryOutcome {
            query: query.to_string(),
            numerator,
            denominator,
            probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{init_logging, sprinkler_network};

    #[test]
    fn parses_targets_and_evidence() {
        let query: Query = " S = T , R=f | W=true ".parse().unwrap();
        assert_eq!(
            query,
            Query::from_pairs(&[("S", true), ("R", false)], &[("W", true)])
        );
        assert_eq!(query.to_string(), "S=T,R=F|W=T");
    }

    #[test]
    fn evidence_is_optional() {
        let query: Query = "WG=T".parse().unwrap();
        assert!(query.evidence.is_empty());
        let query: Query = "WG=T|".parse().unwrap();
        assert!(query.evidence.is_empty());
        assert_eq!(query.to_string(), "WG=T");
    }

    #[test]
    fn rejects_malformed_queries() {
        for text in ["", "|W=T", "S", "S=T|W=T|R=T", "S=T,,R=F", "=T"] {
            let err = text.parse::<Query>().unwrap_err();
            assert!(
                matches!(err, InferenceError::QuerySyntax(_)),
                "{text:?} gave {err:?}"
            );
        }
        assert_eq!(
            "S=X|W=T".parse::<Query>().unwrap_err(),
            InferenceError::InvalidAssignmentValue {
                variable: "S".to_string(),
                token: "X".to_string()
            }
        );
    }

    #[test]
    fn sprinkler_reference_values() {
        init_logging();
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        assert_eq!(evaluator.evaluate(&[("S", true)], &[("W", true)]).unwrap(), 0.75);
        assert_eq!(evaluator.evaluate(&[("W", true)], &[]).unwrap(), 0.6);

        let p = evaluator.evaluate_str("W=T|WG=T").unwrap();
        assert!((p - 0.5995709688952449).abs() < 1e-12);
        let p = evaluator.evaluate_str("S=T|WG=T").unwrap();
        assert!((p - 0.6899535216303181).abs() < 1e-12);
    }

    #[test]
    fn detailed_outcome_carries_both_enumerations() {
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        let outcome = evaluator
            .evaluate_detailed(&"S=T|W=T".parse().unwrap())
            .unwrap();
        assert_eq!(outcome.query, "S=T|W=T");
        assert_eq!(outcome.denominator, 0.6);
        assert_eq!(outcome.probability, 0.75);
        assert!((outcome.numerator - 0.45).abs() < 1e-12);
    }

    #[test]
    fn zero_probability_evidence_is_undefined() {
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        assert_eq!(
            evaluator.evaluate_str("W=T|SR=T,R=F"),
            Err(InferenceError::DivisionUndefined {
                evidence: "SR=T,R=F".to_string()
            })
        );
        assert!(matches!(
            evaluator.evaluate_str("W=T|R=T,R=F"),
            Err(InferenceError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn target_contradicting_evidence_has_zero_probability() {
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        assert_eq!(evaluator.evaluate_str("R=F|R=T").unwrap(), 0.0);
        assert_eq!(evaluator.evaluate_str("R=T|R=T").unwrap(), 1.0);
    }

    #[test]
    fn unassigned_query_values_are_rejected() {
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        let expected = Err(InferenceError::InvalidAssignmentValue {
            variable: "S".to_string(),
            token: "?".to_string(),
        });

        let open_target = Query::new(
            vec![Assignment::new("S", TruthValue::Unassigned)],
            vec![Assignment::observed("W", true)],
        );
        assert_eq!(evaluator.evaluate_query(&open_target), expected);
        assert_eq!(
            open_target.to_string().parse::<Query>().map(|_| ()),
            expected.map(|_: f64| ())
        );

        let open_evidence = Query::new(
            vec![Assignment::observed("R", true)],
            vec![
                Assignment::observed("W", true),
                Assignment::new("W", TruthValue::Unassigned),
            ],
        );
        assert!(matches!(
            evaluator.evaluate_query(&open_evidence),
            Err(InferenceError::InvalidAssignmentValue { .. })
        ));
    }

    #[test]
    fn unknown_variables_are_reported() {
        let network = sprinkler_network();
        let evaluator = QueryEvaluator::new(&network);
        assert_eq!(
            evaluator.evaluate_str("X=T|W=T"),
            Err(InferenceError::UnknownVariable("X".to_string()))
        );
        assert_eq!(
            evaluator.evaluate(&[("S", true)], &[("w", true)]),
            Err(InferenceError::UnknownVariable("w".to_string()))
        );
    }
}
