//! Offline answers for when the completion endpoint is unavailable
//!
//! The rule table is ordered and the first matching rule wins. Matching is a
//! case-insensitive substring test against the user's text.

/// Reply for questions about brackets or rates
pub const TAX_BRACKETS_REPLY: &str = "Tax brackets in the United States for 2023 are progressive:

For single filers:
  • 10% for income up to $11,000
  • 12% for income over $11,000 to $44,725
  • 22% for income over $44,725 to $95,375
  • 24% for income over $95,375 to $182,100
  • 32% for income over $182,100 to $231,250
  • 35% for income over $231,250 to $578,125
  • 37% for income over $578,125

For married filing jointly:
  • 10% for income up to $22,000
  • 12% for income over $22,000 to $89,450
  • 22% for income over $89,450 to $190,750
  • 24% for income over $190,750 to $364,200
  • 32% for income over $364,200 to $462,500
  • 35% for income over $462,500 to $693,750
  • 37% for income over $693,750";

/// Reply for questions about deductions
pub const DEDUCTIONS_REPLY: &str = "For 2023, the standard deduction amounts are:

  • Single or Married Filing Separately: $13,850
  • Married Filing Jointly: $27,700
  • Head of Household: $20,800

Standard deduction reduces your taxable income. You can choose to take the standard deduction or itemize deductions, whichever gives you the greater tax benefit.";

/// Reply for questions about credits
pub const CREDITS_REPLY: &str = "Tax credits directly reduce the amount of tax you owe, dollar for dollar. Some common tax credits include:

  • Child Tax Credit: Up to $2,000 per qualifying child under 17
  • Earned Income Tax Credit: For low to moderate income workers
  • American Opportunity Credit: Up to $2,500 per eligible student for education expenses
  • Lifetime Learning Credit: Up to $2,000 per tax return for education expenses
  • Child and Dependent Care Credit: Up to $3,000 for one qualifying person or $6,000 for two or more

Credits are more valuable than deductions because they reduce taxes directly rather than just reducing taxable income.";

/// A single keyword rule
#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    /// Short name used in logs
    pub name: &'static str,
    /// Lowercase keywords; any one matching selects the rule
    pub keywords: &'static [&'static str],
    /// Reply returned when the rule matches
    pub reply: &'static str,
}

impl FallbackRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

/// Ordered rule table; earlier rules take priority
pub const RULES: &[FallbackRule] = &[
    FallbackRule {
        name: "brackets",
        keywords: &["tax bracket", "tax rate"],
        reply: TAX_BRACKETS_REPLY,
    },
    FallbackRule {
        name: "deductions",
        keywords: &["deduction"],
        reply: DEDUCTIONS_REPLY,
    },
    FallbackRule {
        name: "credits",
        keywords: &["credit"],
        reply: CREDITS_REPLY,
    },
];

/// Generic clarifying reply quoting the user's text
fn clarifying_reply(query: &str) -> String {
    format!(
        "I understand you're asking about \"{}\". As a tax assistant, I can help with various \
tax-related questions including tax calculations, deductions, credits, filing status, and tax \
planning strategies.

To give you the most accurate information, I'd need some more specific details. Could you provide \
more information about your question? For example, are you asking about a particular tax year, \
filing status, or specific tax situation?

Feel free to ask about tax brackets, deductions, credits, or how specific life events might affect \
your taxes.",
        query
    )
}

/// Name of the rule that would answer `query`, or `None` for the generic reply
pub fn matching_rule(query: &str) -> Option<&'static str> {
    let normalized = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.name)
}

/// Derive a reply for `query` from the rule table
///
/// Never fails and never returns an empty string.
///
/// # Examples
///
/// ```
/// use taxwise::chat::fallback::{fallback_reply, DEDUCTIONS_REPLY};
///
/// assert_eq!(fallback_reply("Is there a standard DEDUCTION?"), DEDUCTIONS_REPLY);
/// assert!(fallback_reply("hello").contains("\"hello\""));
/// ```
pub fn fallback_reply(query: &str) -> String {
    let normalized = query.to_lowercase();
    match RULES.iter().find(|rule| rule.matches(&normalized)) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, "Fallback rule matched");
            rule.reply.to_string()
        }
        None => clarifying_reply(query),
    }
}
