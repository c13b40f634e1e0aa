//! Structural pattern matcher.
//!
//! Scans newly rendered nodes against the signature catalogue with one
//! case-insensitive Aho-Corasick automaton over every keyword. Each node
//! yields at most one event across the observation lifetime: matched
//! nodes enter a visited set keyed by their stable identity and are
//! never re-examined.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{SystemTime, UNIX_EPOCH};

use aho_corasick::AhoCorasick;
use smallvec::SmallVec;

use lendscope_core::types::detection::DetectionEvent;
use lendscope_core::types::node::RenderedNode;
use lendscope_core::FxHashSet;

use super::catalogue::SignatureCatalogue;

/// Current unix time in milliseconds.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Matches rendered nodes against the signature catalogue.
pub struct PatternMatcher {
    catalogue: SignatureCatalogue,
    /// One automaton over all catalogue keywords, ASCII case-insensitive.
    automaton: Option<AhoCorasick>,
    /// Automaton pattern index → catalogue signature index.
    pattern_to_signature: Vec<usize>,
    /// Stable ids of nodes that already produced an event.
    visited: FxHashSet<u64>,
    /// Next event id, monotonically increasing per session.
    next_event_id: u64,
}

impl PatternMatcher {
    /// Compile a matcher for the given catalogue.
    pub fn new(catalogue: SignatureCatalogue) -> Self {
        let mut patterns: Vec<&str> = Vec::new();
        let mut pattern_to_signature = Vec::new();
        for (idx, signature) in catalogue.signatures().iter().enumerate() {
            for keyword in &signature.keywords {
                patterns.push(keyword.as_str());
                pattern_to_signature.push(idx);
            }
        }
        let automaton = match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
        {
            Ok(automaton) => Some(automaton),
            Err(error) => {
                tracing::error!(%error, "failed to compile signature automaton");
                None
            }
        };
        Self {
            catalogue,
            automaton,
            pattern_to_signature,
            visited: FxHashSet::default(),
            next_event_id: 1,
        }
    }

    /// The catalogue this matcher was compiled from.
    pub fn catalogue(&self) -> &SignatureCatalogue {
        &self.catalogue
    }

    /// Number of nodes that have produced an event.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Scan one batch of newly rendered nodes, in slice order.
    ///
    /// Emits at most one event per node per lifetime. When a node matches
    /// several signatures, the earliest catalogue entry wins. A panic
    /// while examining one node is recovered and logged; the rest of the
    /// pass continues.
    pub fn scan(&mut self, nodes: &[RenderedNode]) -> Vec<DetectionEvent> {
        let mut events = Vec::new();
        for node in nodes {
            if self.visited.contains(&node.id) {
                continue;
            }
            let matched = catch_unwind(AssertUnwindSafe(|| self.match_node(node)));
            match matched {
                Ok(Some((signature_idx, keyword_hits))) => {
                    self.visited.insert(node.id);
                    events.push(self.build_event(signature_idx, keyword_hits));
                }
                Ok(None) => {}
                Err(_) => {
                    tracing::error!(node_id = node.id, "signature scan panicked; node skipped");
                }
            }
        }
        events
    }

    /// Find the earliest catalogue signature matching this node, along
    /// with the keywords that hit.
    fn match_node(&self, node: &RenderedNode) -> Option<(usize, SmallVec<[String; 2]>)> {
        let automaton = self.automaton.as_ref()?;
        let mut best: Option<usize> = None;
        let mut hits: Vec<(usize, usize)> = Vec::new();
        for found in automaton.find_overlapping_iter(&node.text) {
            let pattern_idx = found.pattern().as_usize();
            let signature_idx = self.pattern_to_signature[pattern_idx];
            let signature = &self.catalogue.signatures()[signature_idx];
            if !signature.applies_to(node.role) {
                continue;
            }
            hits.push((signature_idx, pattern_idx));
            best = Some(best.map_or(signature_idx, |b: usize| b.min(signature_idx)));
        }
        let best = best?;
        let mut keyword_hits: SmallVec<[String; 2]> = SmallVec::new();
        for (signature_idx, pattern_idx) in hits {
            if signature_idx != best {
                continue;
            }
            let keyword = &self.catalogue.signatures()[best].keywords[local_keyword_index(
                &self.pattern_to_signature,
                best,
                pattern_idx,
            )];
            if !keyword_hits.contains(keyword) {
                keyword_hits.push(keyword.clone());
            }
        }
        Some((best, keyword_hits))
    }

    fn build_event(
        &mut self,
        signature_idx: usize,
        keyword_hits: SmallVec<[String; 2]>,
    ) -> DetectionEvent {
        let signature = &self.catalogue.signatures()[signature_idx];
        let event = DetectionEvent {
            id: self.next_event_id,
            signature_id: signature.id.clone(),
            category: signature.category,
            severity: signature.severity,
            name: signature.name.clone(),
            description: signature.description.clone(),
            keyword_hits,
            explanation: signature.explanation.clone(),
            detected_at_ms: now_ms(),
        };
        self.next_event_id += 1;
        event
    }
}

/// Position of `pattern_idx` among the patterns belonging to
/// `signature_idx`, i.e. the index into that signature's keyword list.
fn local_keyword_index(pattern_to_signature: &[usize], signature_idx: usize, pattern_idx: usize) -> usize {
    pattern_to_signature[..pattern_idx]
        .iter()
        .filter(|&&s| s == signature_idx)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendscope_core::types::detection::{DetectionCategory, Severity};
    use lendscope_core::types::node::NodeRole;

    fn matcher() -> PatternMatcher {
        PatternMatcher::new(SignatureCatalogue::builtin())
    }

    #[test]
    fn test_countdown_timer_detected_once() {
        let mut matcher = matcher();
        let node = RenderedNode::new(7, NodeRole::Timer, "Offer ends in 04:59 — act now!");
        let events = matcher.scan(std::slice::from_ref(&node));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, DetectionCategory::DarkPattern);
        assert_eq!(events[0].severity, Severity::High);
        assert_eq!(events[0].signature_id, "urgency-timer");

        // Same element again: no second event, ever.
        let events = matcher.scan(&[node]);
        assert!(events.is_empty());
        assert_eq!(matcher.visited_count(), 1);
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let mut matcher = matcher();
        let events = matcher.scan(&[RenderedNode::new(
            1,
            NodeRole::LegalText,
            "BORROWER AGREES TO A CONFESSION OF JUDGMENT",
        )]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, DetectionCategory::LegalViolation);
        assert_eq!(events[0].severity, Severity::Critical);
    }

    #[test]
    fn test_role_gating() {
        let mut matcher = matcher();
        // Waiver language outside a legal block does not match the
        // rights-waiver signature.
        let events = matcher.scan(&[RenderedNode::new(
            2,
            NodeRole::Timer,
            "you waive your rights",
        )]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_one_event_per_node_even_with_multiple_signatures() {
        let mut matcher = matcher();
        // Text that matches both the disguised-fee keywords and nothing
        // else on a fee display still yields exactly one event.
        let events = matcher.scan(&[RenderedNode::new(
            3,
            NodeRole::FeeDisplay,
            "A small service fee plus an optional tip",
        )]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].signature_id, "disguised-fee");
        assert!(events[0].keyword_hits.len() >= 2);
    }

    #[test]
    fn test_batch_order_is_slice_order() {
        let mut matcher = matcher();
        let events = matcher.scan(&[
            RenderedNode::new(10, NodeRole::PaymentSchedule, "debited each day"),
            RenderedNode::new(11, NodeRole::Timer, "countdown to expiry"),
        ]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].signature_id, "daily-debit");
        assert_eq!(events[1].signature_id, "urgency-timer");
        assert!(events[0].id < events[1].id);
    }

    #[test]
    fn test_unmatched_node_not_marked_visited() {
        let mut matcher = matcher();
        let quiet = RenderedNode::new(20, NodeRole::Generic, "plain informational text");
        assert!(matcher.scan(std::slice::from_ref(&quiet)).is_empty());
        assert_eq!(matcher.visited_count(), 0);

        // The same node can still match later once deceptive text appears.
        let loud = RenderedNode::new(20, NodeRole::Generic, "limited time offer");
        let events = matcher.scan(&[loud]);
        assert_eq!(events.len(), 1);
    }
}
