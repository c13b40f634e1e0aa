//! Declarative signature catalogue.
//!
//! Each deceptive construct is one table entry; the matcher evaluates
//! all entries with a single driver loop, so adding a dark pattern is a
//! data change, not new control flow.

use lendscope_core::config::MonitorConfig;
use lendscope_core::types::detection::{DetectionCategory, Explanation, Severity};
use lendscope_core::types::node::NodeRole;

/// One deceptive-construct signature.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Stable id (e.g. "urgency-timer").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Manipulation category reported on match.
    pub category: DetectionCategory,
    /// Severity reported on match.
    pub severity: Severity,
    /// Structural roles this signature applies to. Empty means any role.
    pub roles: Vec<NodeRole>,
    /// Keywords matched case-insensitively against node text. A node
    /// matches if any keyword is present.
    pub keywords: Vec<String>,
    /// One-line description of the construct.
    pub description: String,
    /// User-facing explanation triplet.
    pub explanation: Explanation,
}

impl Signature {
    /// Whether this signature applies to nodes of the given role.
    pub fn applies_to(&self, role: NodeRole) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }
}

/// The fixed (but extensible) catalogue the matcher scans with.
#[derive(Debug, Clone)]
pub struct SignatureCatalogue {
    signatures: Vec<Signature>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl SignatureCatalogue {
    /// An empty catalogue.
    pub fn empty() -> Self {
        Self {
            signatures: Vec::new(),
        }
    }

    /// The built-in catalogue of known predatory-lending constructs.
    pub fn builtin() -> Self {
        let mut catalogue = Self::empty();

        catalogue.push(Signature {
            id: "urgency-timer".to_string(),
            name: "Countdown / urgency timer".to_string(),
            category: DetectionCategory::DarkPattern,
            severity: Severity::High,
            roles: vec![NodeRole::Timer, NodeRole::Generic],
            keywords: strings(&[
                "expires in",
                "offer ends",
                "countdown",
                "limited time",
                "act now",
            ]),
            description: "Artificial time pressure on the loan decision".to_string(),
            explanation: Explanation {
                whats_happening: "A countdown timer is pressuring you to accept before \
                                  the offer supposedly expires."
                    .to_string(),
                why_it_matters: "Legitimate loan offers do not vanish in minutes; urgency \
                                 exists to stop you from comparing terms."
                    .to_string(),
                how_to_protect: "Ignore the timer. Any offer that punishes a day of \
                                 reflection is not an offer worth taking."
                    .to_string(),
            },
        });

        catalogue.push(Signature {
            id: "disguised-fee".to_string(),
            name: "Disguised fee language".to_string(),
            category: DetectionCategory::HiddenCost,
            severity: Severity::Critical,
            roles: vec![NodeRole::FeeDisplay],
            keywords: strings(&[
                "tip",
                "service fee",
                "processing fee",
                "convenience fee",
                "express fee",
            ]),
            description: "A cost presented as something other than a cost".to_string(),
            explanation: Explanation {
                whats_happening: "A charge is being framed as a 'tip' or 'service fee' so \
                                  it does not read as part of the loan price."
                    .to_string(),
                why_it_matters: "Renamed fees are usually excluded from the displayed APR, \
                                 making the loan look far cheaper than it is."
                    .to_string(),
                how_to_protect: "Add up every dollar you will pay and divide by the amount \
                                 you receive. That ratio is the real price."
                    .to_string(),
            },
        });

        catalogue.push(Signature {
            id: "rights-waiver".to_string(),
            name: "Waiver-of-rights language".to_string(),
            category: DetectionCategory::LegalViolation,
            severity: Severity::Critical,
            roles: vec![NodeRole::LegalText],
            keywords: strings(&[
                "waive",
                "confession of judgment",
                "waiver of jury trial",
                "binding arbitration",
            ]),
            description: "Terms that sign away legal protections".to_string(),
            explanation: Explanation {
                whats_happening: "The fine print asks you to give up rights such as suing \
                                  or contesting a judgment."
                    .to_string(),
                why_it_matters: "Confession-of-judgment clauses let a lender win in court \
                                 without you ever being heard; several states ban them."
                    .to_string(),
                how_to_protect: "Never sign away the right to dispute. If the contract \
                                 contains these words, walk away."
                    .to_string(),
            },
        });

        catalogue.push(Signature {
            id: "daily-debit".to_string(),
            name: "Non-monthly debit schedule".to_string(),
            category: DetectionCategory::Manipulation,
            severity: Severity::High,
            roles: vec![NodeRole::PaymentSchedule],
            keywords: strings(&["daily", "each day", "every day", "per day"]),
            description: "Repayments debited daily rather than monthly".to_string(),
            explanation: Explanation {
                whats_happening: "Payments are scheduled daily, which hides how much \
                                  leaves your account over a month."
                    .to_string(),
                why_it_matters: "A '$15 a day' framing obscures a $450 monthly outflow and \
                                 multiplies overdraft exposure."
                    .to_string(),
                how_to_protect: "Convert every payment schedule to a monthly total before \
                                 comparing it to your income."
                    .to_string(),
            },
        });

        catalogue
    }

    /// Built-in catalogue plus any extra signatures from config. Entries
    /// with an unknown category or severity name are skipped with a
    /// warning rather than failing the session.
    pub fn from_config(config: &MonitorConfig) -> Self {
        let mut catalogue = Self::builtin();
        for extra in &config.extra_signatures {
            let (Some(category), Some(severity)) = (
                DetectionCategory::parse_str(&extra.category),
                Severity::parse_str(&extra.severity),
            ) else {
                tracing::warn!(
                    signature_id = %extra.id,
                    category = %extra.category,
                    severity = %extra.severity,
                    "skipping extra signature with unknown category or severity"
                );
                continue;
            };
            catalogue.push(Signature {
                id: extra.id.clone(),
                name: extra.name.clone(),
                category,
                severity,
                roles: Vec::new(),
                keywords: extra.keywords.clone(),
                description: extra.description.clone().unwrap_or_default(),
                explanation: Explanation {
                    whats_happening: extra.name.clone(),
                    why_it_matters: extra.description.clone().unwrap_or_default(),
                    how_to_protect: String::new(),
                },
            });
        }
        catalogue
    }

    /// Add a signature to the catalogue.
    pub fn push(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }

    /// All signatures, in fixed evaluation order.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Look up a signature by id.
    pub fn get(&self, id: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_covers_all_categories() {
        let catalogue = SignatureCatalogue::builtin();
        assert_eq!(catalogue.len(), 4);
        for category in DetectionCategory::all() {
            assert!(
                catalogue
                    .signatures()
                    .iter()
                    .any(|s| s.category == *category),
                "no builtin signature for {}",
                category.name()
            );
        }
    }

    #[test]
    fn test_role_scoping() {
        let catalogue = SignatureCatalogue::builtin();
        let waiver = catalogue.get("rights-waiver").unwrap();
        assert!(waiver.applies_to(NodeRole::LegalText));
        assert!(!waiver.applies_to(NodeRole::Timer));
    }

    #[test]
    fn test_from_config_merges_extras() {
        let config = MonitorConfig::from_toml(
            r#"
            [[extra_signatures]]
            id = "bait-language"
            name = "Guaranteed approval bait"
            category = "dark_pattern"
            severity = "medium"
            keywords = ["guaranteed approval", "no credit check"]
            "#,
        )
        .unwrap();
        let catalogue = SignatureCatalogue::from_config(&config);
        assert_eq!(catalogue.len(), 5);
        let extra = catalogue.get("bait-language").unwrap();
        assert_eq!(extra.severity, Severity::Medium);
        assert!(extra.applies_to(NodeRole::Generic));
    }

    #[test]
    fn test_from_config_skips_unknown_tier() {
        let config = MonitorConfig::from_toml(
            r#"
            [[extra_signatures]]
            id = "bad"
            name = "Bad"
            category = "dark_pattern"
            severity = "apocalyptic"
            keywords = ["x"]
            "#,
        )
        .unwrap();
        let catalogue = SignatureCatalogue::from_config(&config);
        assert_eq!(catalogue.len(), 4);
    }
}
