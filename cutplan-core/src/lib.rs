//! cutplan-core - Core library for plank purchase optimization.
//!
//! Given a catalog of purchasable planks (width, length, unit price,
//! optional stock cap), a list of required pieces and a saw kerf, this
//! library computes the cheapest set of planks to buy and assigns every
//! required piece onto a purchased plank. Pieces are never rotated and
//! widths never mix, so each width is an independent 1-D packing problem
//! solved by a uniform-cost search.
//!
//! # Example
//!
//! ```
//! use cutplan_core::{plan_purchase, PlankSku, PlannerSettings, RequiredPiece};
//!
//! let catalog = vec![PlankSku::new(100, 1000, 1000)];
//! let required = vec![RequiredPiece::new(100, 400, 2)];
//! let settings = PlannerSettings {
//!     saw_kerf_mm: 5,
//!     ..Default::default()
//! };
//!
//! let result = plan_purchase(&catalog, &required, &settings);
//! assert_eq!(result.planks.len(), 1);
//! assert_eq!(result.total_cents(&catalog), 1000);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod model;
pub mod plan;
pub mod project;
pub mod solver;
pub mod validation;

// Re-exports for convenience
pub use config::{PlannerSettings, Unit};
pub use error::{PlanError, Result, WidthFailure};
pub use model::{CutPiece, Dimension, Dimensioned, PieceUnit, Plank, PlankSku, RequiredPiece};
pub use plan::{build_purchase_plan, total_cents, PlanReport, PurchaseItem};
pub use project::Project;
pub use solver::{plan_purchase, PlanResult, SearchStats};
pub use validation::{validate_input, ValidationResult};

/// Compute a complete plan from a project document.
///
/// This is the main high-level function: it validates the input, runs the
/// purchase optimization, and aggregates the planks into purchase rows.
/// Validation warnings are logged and do not block the computation;
/// validation errors abort it with [`PlanError::InvalidInput`].
/// Unsatisfiable width classes surface as messages in the report, never as
/// errors.
pub fn plan_project(project: &Project) -> Result<PlanReport> {
    let validation = validate_input(
        &project.catalog,
        &project.required_pieces,
        &project.settings,
    );
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    if !validation.passed {
        return Err(PlanError::InvalidInput {
            messages: validation.errors,
        });
    }

    let result = plan_purchase(&project.catalog, &project.required_pieces, &project.settings);
    let purchase_plan = build_purchase_plan(&project.catalog, &result.planks);
    let total = total_cents(&purchase_plan);

    Ok(PlanReport {
        purchase_plan,
        total_cents: total,
        errors: result.error_messages(),
        planks: result.planks,
        stats: result.stats,
    })
}
