//! Namespace Matcher
//!
//! Resolves one subscription pattern against the cycle's concrete metric
//! set. A subscription namespace renders to a `/`-joined path in which
//! every unbound dynamic segment becomes a match-any token; the compiled
//! pattern is anchored at both ends, so prefix matches never leak through.
//! Matching is also length-strict: a pattern only ever matches candidates
//! with the same segment count, which keeps a 5-segment health pattern off
//! 7-segment attribute instances regardless of wildcards.
//!
//! On a match the subscription's tags form the base and the candidate's own
//! tags win on key collision; the candidate's unit is replaced by whatever
//! unit the subscription declared.

use crate::error::{CollectorError, Result};
use crate::metric::{Metric, MetricTemplate, Namespace, WILDCARD};
use regex::Regex;

/// Compile a subscription namespace into an anchored path regex. Literal
/// segment values are escaped, so device or attribute names containing
/// regex metacharacters match only themselves.
fn compile_pattern(namespace: &Namespace) -> Result<Regex> {
    if namespace.is_empty() {
        return Err(CollectorError::EmptyNamespace);
    }

    let mut pattern = String::from("^");
    for (i, segment) in namespace.segments().iter().enumerate() {
        if i > 0 {
            pattern.push('/');
        }
        let value = segment.rendered();
        if value == WILDCARD {
            pattern.push_str(".*");
        } else {
            pattern.push_str(&regex::escape(value));
        }
    }
    pattern.push('$');

    Regex::new(&pattern).map_err(|source| CollectorError::Pattern {
        pattern: namespace.render(),
        source,
    })
}

/// Return the candidates selected by `subscription`, with the
/// subscription's tags and unit merged into each returned instance.
pub fn match_subscription(
    subscription: &MetricTemplate,
    candidates: &[Metric],
) -> Result<Vec<Metric>> {
    let pattern = compile_pattern(&subscription.namespace)?;

    let mut matched = Vec::new();
    for candidate in candidates {
        if candidate.namespace.len() != subscription.namespace.len() {
            continue;
        }
        if !pattern.is_match(&candidate.namespace.render()) {
            continue;
        }

        let mut tags = subscription.tags.clone();
        tags.extend(candidate.tags.clone());

        matched.push(Metric {
            namespace: candidate.namespace.clone(),
            data: candidate.data.clone(),
            timestamp: candidate.timestamp,
            unit: subscription.unit.clone(),
            tags,
        });
    }
    Ok(matched)
}
