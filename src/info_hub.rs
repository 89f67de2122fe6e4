//! Tax information hub
//!
//! Static reference content: topic categories, frequently asked questions,
//! and educational resources, plus a topic search used by `taxwise info`.

use serde::Serialize;

/// A single browsable topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Topic name, also used as the subject of "ask about" prompts
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// A group of related topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable identifier
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Topics in display order
    pub topics: &'static [Topic],
}

/// Frequently asked question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Educational resource entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
}

/// A topic matched by [`search_topics`], tagged with its category title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicMatch {
    pub topic: Topic,
    pub category: &'static str,
}

const fn topic(name: &'static str, description: &'static str) -> Topic {
    Topic { name, description }
}

/// All topic categories
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "basics",
        title: "Tax Basics",
        topics: &[
            topic("Understanding Tax Brackets", "How progressive tax rates work"),
            topic(
                "Filing Status Options",
                "Single, married filing jointly, head of household",
            ),
            topic("Tax Deadlines", "Important dates for filing and payments"),
            topic("Tax Forms Explained", "Overview of common tax forms"),
        ],
    },
    Category {
        id: "deductions",
        title: "Deductions & Credits",
        topics: &[
            topic("Standard vs. Itemized Deductions", "Which is better for you?"),
            topic(
                "Common Tax Deductions",
                "Mortgage interest, charitable donations, etc.",
            ),
            topic("Child Tax Credit", "Benefits for taxpayers with children"),
            topic(
                "Education Credits",
                "American Opportunity and Lifetime Learning Credits",
            ),
        ],
    },
    Category {
        id: "income",
        title: "Income Types",
        topics: &[
            topic("Earned Income", "Wages, salaries, tips, and self-employment"),
            topic("Investment Income", "Dividends, interest, capital gains"),
            topic(
                "Rental Income",
                "Tax implications of rental property ownership",
            ),
            topic(
                "Retirement Income",
                "Social Security, pensions, and IRA distributions",
            ),
        ],
    },
    Category {
        id: "special",
        title: "Special Situations",
        topics: &[
            topic(
                "Self-Employment Taxes",
                "What you need to know when self-employed",
            ),
            topic(
                "Home Office Deduction",
                "Rules for deducting home office expenses",
            ),
            topic("Moving for Work", "Tax implications of job-related moves"),
            topic("Selling Your Home", "Capital gains exclusion rules"),
        ],
    },
];

/// Frequently asked questions
pub const FAQS: &[Faq] = &[
    Faq {
        question: "What is the deadline for filing taxes?",
        answer: "For most individuals, federal tax returns are generally due on April 15th. \
If this date falls on a weekend or holiday, the deadline is extended to the next business day. \
You can request an extension to file until October 15th, but you still need to pay any \
estimated taxes by the April deadline to avoid penalties and interest.",
    },
    Faq {
        question: "What documents do I need to prepare my tax return?",
        answer: "You should gather: W-2 forms from employers, 1099 forms for other income, \
receipts for tax-deductible expenses, last year's tax return, Social Security numbers for you \
and dependents, bank account information for direct deposit, and any tax forms specific to \
your situation (like 1098-E for student loan interest).",
    },
    Faq {
        question: "What's the difference between a tax deduction and a tax credit?",
        answer: "A tax deduction reduces your taxable income before calculating your tax \
liability, while a tax credit directly reduces your tax liability dollar-for-dollar. For \
example, a $1,000 deduction might reduce your taxes by $220 if you're in the 22% tax bracket, \
whereas a $1,000 tax credit reduces your taxes by the full $1,000 regardless of your tax \
bracket.",
    },
    Faq {
        question: "Do I have to file taxes if my income is low?",
        answer: "Whether you need to file depends on your filing status, age, and gross \
income. For 2023, single filers under 65 generally need to file if their gross income was at \
least $12,950. However, even if you're not required to file, you might want to if you're \
eligible for refundable credits or had taxes withheld from your paycheck.",
    },
    Faq {
        question: "What happens if I can't pay the taxes I owe?",
        answer: "You should still file your tax return on time to avoid the failure-to-file \
penalty. The IRS offers several payment options including installment agreements, temporary \
delay of collection, and offers in compromise. Contact the IRS as soon as possible to discuss \
your options.",
    },
    Faq {
        question: "How long should I keep my tax records?",
        answer: "The IRS recommends keeping tax returns and supporting documents for at least \
three years after filing, as this is generally the period during which you can amend your \
return or the IRS can assess additional tax. However, for certain situations like claiming a \
loss from worthless securities, you should keep records for seven years. Employment tax \
records should be kept for at least four years.",
    },
];

/// Educational resources
pub const RESOURCES: &[Resource] = &[
    Resource {
        title: "Tax Guides for Beginners",
        description: "Step-by-step guides to help you understand the basics of taxation.",
    },
    Resource {
        title: "Video Tutorials",
        description: "Visual explanations of common tax concepts and filing procedures.",
    },
    Resource {
        title: "Tax Calculators & Tools",
        description: "Interactive tools to estimate taxes and plan your finances.",
    },
    Resource {
        title: "Tax Law Updates",
        description: "Latest changes to tax laws that might affect your filing.",
    },
];

/// Find topics whose name or description contains `query`
///
/// Matching is case-insensitive. Results keep category order, then topic
/// order. An empty or whitespace-only query matches nothing.
///
/// # Examples
///
/// ```
/// use taxwise::info_hub::search_topics;
///
/// let matches = search_topics("CREDIT");
/// assert!(matches.iter().any(|m| m.topic.name == "Child Tax Credit"));
/// assert!(search_topics("").is_empty());
/// ```
pub fn search_topics(query: &str) -> Vec<TopicMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    CATEGORIES
        .iter()
        .flat_map(|category| {
            category.topics.iter().map(move |topic| TopicMatch {
                topic: *topic,
                category: category.title,
            })
        })
        .filter(|m| {
            m.topic.name.to_lowercase().contains(&needle)
                || m.topic.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Look up a topic by exact name, ignoring case
pub fn find_topic(name: &str) -> Option<TopicMatch> {
    let name = name.trim();
    CATEGORIES.iter().find_map(|category| {
        category
            .topics
            .iter()
            .find(|topic| topic.name.eq_ignore_ascii_case(name))
            .map(|topic| TopicMatch {
                topic: *topic,
                category: category.title,
            })
    })
}

/// Chat prompt asking the assistant to explain `topic`
pub fn ask_about_prompt(topic: &str) -> String {
    format!("Can you explain {} in simple terms?", topic.trim())
}
