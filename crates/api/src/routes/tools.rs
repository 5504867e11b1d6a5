//! Developer tooling and documentation endpoints.
//!
//! These back the internal "CAE Tools" pages: the color reference tool and
//! the developer documentation index.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::AppState;

/// Creates the tools router. These routes are public; they expose nothing
/// but static reference data.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tools/colors", get(color_tool))
        .route("/docs", get(docs_index))
}

/// A named color swatch.
#[derive(Debug, Serialize)]
struct Swatch {
    name: &'static str,
    hex: &'static str,
}

/// Official university palette, per brand guidelines.
const OFFICIAL_COLORS: &[Swatch] = &[
    Swatch {
        name: "WMU Gold",
        hex: "#FFAE00",
    },
    Swatch {
        name: "WMU Brown",
        hex: "#532E1F",
    },
    Swatch {
        name: "Metallic Gold",
        hex: "#8F6B2D",
    },
    Swatch {
        name: "Dark Brown",
        hex: "#331900",
    },
    Swatch {
        name: "Sepia",
        hex: "#A9431E",
    },
    Swatch {
        name: "Teal",
        hex: "#0B645D",
    },
];

/// GET /tools/colors - The official color palette.
///
/// The interactive picker this page once hosted is long dead; the endpoint
/// now serves the official swatches plus pointers to better tooling.
async fn color_tool() -> impl IntoResponse {
    Json(serde_json::json!({
        "colors": OFFICIAL_COLORS,
        "warnings": [
            "This page is no longer maintained, and is broken as of 2021.",
            "Use this page to reference official university colors. Please see https://color.adobe.com for palette tooling.",
        ],
    }))
}

/// A documentation topic entry.
#[derive(Debug, Serialize)]
struct DocTopic {
    slug: &'static str,
    title: &'static str,
    summary: &'static str,
}

/// The developer documentation index. Topic bodies live in the repo's
/// `docs/` tree; this endpoint only serves the table of contents.
const DOC_TOPICS: &[DocTopic] = &[
    DocTopic {
        slug: "intro",
        title: "Introduction",
        summary: "What the portal is and how the pieces fit together.",
    },
    DocTopic {
        slug: "setup",
        title: "General Setup",
        summary: "Environment configuration, database bootstrap, first login.",
    },
    DocTopic {
        slug: "models",
        title: "Data Model",
        summary: "The three user record types and the campus/inventory tables.",
    },
    DocTopic {
        slug: "ldap",
        title: "Directory Integration",
        summary: "Campus LDAP sync, the retention window, and status rules.",
    },
    DocTopic {
        slug: "seeds-and-fixtures",
        title: "Seeds and Fixtures",
        summary: "Seeder subcommands, fixture groups, and retry behavior.",
    },
    DocTopic {
        slug: "tests",
        title: "Testing",
        summary: "Unit tests, live-database tests, and how to run them.",
    },
];

/// GET /docs - Documentation table of contents.
async fn docs_index() -> impl IntoResponse {
    Json(serde_json::json!({ "topics": DOC_TOPICS }))
}
