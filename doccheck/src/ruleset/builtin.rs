//! Built-in contract for the payments API documentation site.
//!
//! Covers the getting-started and reference pages, the Disbursement,
//! Collection and Cash Pickup API families, and the sidebar configuration
//! that lists them.

use super::{ContentRule, FrontmatterRule, Ruleset};

/// Navigation config consumed by the site generator.
pub const SIDEBAR_PATH: &str = "sidebars.js";

/// Directory holding every Markdown page of the site.
pub const DOCS_ROOT: &str = "docs";

const REQUIRED_FILES: &[&str] = &[
    "docs/api/introduction.md",
    "docs/api/authentication.md",
    "docs/api/errors.md",
    "docs/api/webhooks.md",
    "docs/api/disbursement/overview.md",
    "docs/api/disbursement/single-transaction.md",
    "docs/api/disbursement/bulk-transaction.md",
    "docs/api/disbursement/status.md",
    "docs/api/collection/overview.md",
    "docs/api/collection/mobile-money.md",
    "docs/api/collection/card.md",
    "docs/api/collection/status.md",
    "docs/api/cash-pickup/overview.md",
    "docs/api/cash-pickup/authentication.md",
    "docs/api/cash-pickup/claim-transaction.md",
    "docs/api/cash-pickup/verify-identity.md",
    "docs/api/cash-pickup/payout.md",
    "docs/api/cash-pickup/abort.md",
];

/// Sidebar category labels, in display order.
pub const SIDEBAR_SECTIONS: &[&str] = &[
    "Getting Started",
    "Disbursement API",
    "Collection API",
    "Cash Pickup API",
    "Code Samples",
    "Reference",
];

// (rule name, path, required text)
const CONTENT_RULES: &[(&str, &str, &[&str])] = &[
    (
        "Collection API overview contains required information",
        "docs/api/collection/overview.md",
        &[
            "Base URL",
            "/api/v1/middleware",
            "Mobile Money",
            "Card Collections",
        ],
    ),
    (
        "Mobile Money documentation contains required fields",
        "docs/api/collection/mobile-money.md",
        &[
            "Request",
            "transactionId",
            "customerAccount",
            "transactionType",
            "Callback",
        ],
    ),
    (
        "Card Collection documentation contains required fields",
        "docs/api/collection/card.md",
        &[
            "Request",
            "transactionId",
            "transactionType",
            "card",
            "Callback",
        ],
    ),
    (
        "Collection status documentation contains required information",
        "docs/api/collection/status.md",
        &["GET", "/status/", "COMPLETED", "PENDING", "FAILED"],
    ),
    (
        "Cash Pickup API overview contains required information",
        "docs/api/cash-pickup/overview.md",
        &[
            "Base URL",
            "/business_apiV1.0/Cashpickup",
            "Authentication",
            "Claim Transaction",
            "Verify Beneficiary Identity",
            "Payout Beneficiary",
            "Abort Transaction",
        ],
    ),
    (
        "Cash Pickup authentication documentation contains required fields",
        "docs/api/cash-pickup/authentication.md",
        &["/login", "Request", "agent_id", "agent_secret", "token"],
    ),
    (
        "Claim Transaction documentation contains required fields",
        "docs/api/cash-pickup/claim-transaction.md",
        &["/pullTransaction", "Request", "agent_id", "pccn", "trans_ref"],
    ),
    (
        "Verify Identity documentation contains required fields",
        "docs/api/cash-pickup/verify-identity.md",
        &[
            "/confirmBeneficiaryIdentity",
            "Request",
            "id_type",
            "id_number",
            "expiry_date",
            "failure_reason",
        ],
    ),
    (
        "Payout Transaction documentation contains required fields",
        "docs/api/cash-pickup/payout.md",
        &[
            "/payoutTransaction",
            "Request",
            "agent_id",
            "trans_ref",
            "terminal_id",
            "branch_code",
        ],
    ),
    (
        "Abort Transaction documentation contains required fields",
        "docs/api/cash-pickup/abort.md",
        &[
            "/abortTransaction",
            "Request",
            "agent_id",
            "trans_ref",
            "reason_type",
            "other_reason",
        ],
    ),
];

// (rule name, sidebar item ids)
const SIDEBAR_ITEM_RULES: &[(&str, &[&str])] = &[
    (
        "Disbursement API sidebar contains all required items",
        &[
            "api/disbursement/overview",
            "api/disbursement/single-transaction",
            "api/disbursement/bulk-transaction",
            "api/disbursement/status",
            "api/disbursement/bank-codes",
        ],
    ),
    (
        "Collection API sidebar contains all required items",
        &[
            "api/collection/overview",
            "api/collection/mobile-money",
            "api/collection/card",
            "api/collection/status",
        ],
    ),
    (
        "Cash Pickup API sidebar contains all required items",
        &[
            "api/cash-pickup/overview",
            "api/cash-pickup/authentication",
            "api/cash-pickup/claim-transaction",
            "api/cash-pickup/verify-identity",
            "api/cash-pickup/payout",
            "api/cash-pickup/abort",
        ],
    ),
];

/// Assemble the built-in ruleset.
#[must_use]
pub fn payments_portal() -> Ruleset {
    let mut content_rules: Vec<ContentRule> = CONTENT_RULES
        .iter()
        .map(|(name, path, contains)| {
            ContentRule::new(*path, contains.iter().copied()).named(*name)
        })
        .collect();

    content_rules.push(
        ContentRule::new(SIDEBAR_PATH, SIDEBAR_SECTIONS.iter().copied())
            .named("Sidebar contains all required sections"),
    );
    content_rules.extend(SIDEBAR_ITEM_RULES.iter().map(|(name, items)| {
        ContentRule::new(SIDEBAR_PATH, items.iter().copied()).named(*name)
    }));

    Ruleset {
        required_files: REQUIRED_FILES.iter().map(|p| (*p).to_owned()).collect(),
        frontmatter: Some(FrontmatterRule::new([DOCS_ROOT])),
        content_rules,
    }
}
