//! Split calculation routes.
//!
//! Request bodies are checked for shape here and converted into core
//! [`SplitInput`] values; the arithmetic rules themselves live in the core.

use axum::{Json, Router, extract::State, routing::post};
use billsplit_core::split::{SplitCalculator, SplitEntry, SplitInput, SplitMethod, SplitShare};
use billsplit_shared::AppError;
use billsplit_shared::types::{UserId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use validator::Validate;

use crate::{ApiError, AppState, extractors::ValidatedJson, validation};

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/splits/preview", post(preview_split))
        .route("/splits/validate", post(validate_split))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for previewing a split.
#[derive(Debug, Deserialize, Validate)]
pub struct SplitPreviewRequest {
    /// Amount to split.
    #[validate(custom(function = "validation::positive_amount"))]
    pub total_amount: Decimal,
    /// How to split it.
    pub split_type: SplitMethod,
    /// Participants in order; for equal splits earlier ones absorb leftover cents.
    #[validate(length(min = 1, message = "At least one participant is required"))]
    #[validate(nested)]
    pub participants: Vec<SplitParticipantRequest>,
}

/// One participant in a split request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SplitParticipantRequest {
    /// Participant.
    pub user_id: UserId,
    /// Amount owed; required for exact splits.
    #[serde(default)]
    #[validate(custom(function = "validation::non_negative_amount"))]
    pub amount: Option<Decimal>,
    /// Percentage owed; required for percentage splits.
    #[serde(default)]
    #[validate(custom(function = "validation::percentage"))]
    pub percentage: Option<Decimal>,
}

impl TryFrom<SplitPreviewRequest> for SplitInput {
    type Error = AppError;

    fn try_from(request: SplitPreviewRequest) -> Result<Self, Self::Error> {
        let total_amount = request.total_amount;
        let participants = request.participants;

        match request.split_type {
            SplitMethod::Equal => Ok(Self::Equal {
                total_amount,
                participant_ids: participants.iter().map(|p| p.user_id).collect(),
            }),
            SplitMethod::Exact => {
                let entries = participants
                    .iter()
                    .map(|p| {
                        p.amount
                            .map(|amount| SplitEntry::new(p.user_id, amount))
                            .ok_or_else(|| {
                                AppError::Validation(format!(
                                    "amount is required for participant {} in an exact split",
                                    p.user_id
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Exact {
                    total_amount,
                    entries,
                })
            }
            SplitMethod::Percentage => {
                let entries = participants
                    .iter()
                    .map(|p| {
                        p.percentage
                            .map(|percentage| SplitEntry::new(p.user_id, percentage))
                            .ok_or_else(|| {
                                AppError::Validation(format!(
                                    "percentage is required for participant {} in a percentage split",
                                    p.user_id
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Percentage {
                    total_amount,
                    entries,
                })
            }
        }
    }
}

/// Response for a split preview.
#[derive(Debug, Serialize)]
pub struct SplitPreviewResponse {
    /// Split method used.
    pub split_type: SplitMethod,
    /// Total, rounded to cents.
    pub total_amount: Decimal,
    /// Shares in request order.
    pub splits: Vec<SplitShare>,
    /// Sum of the shares.
    pub allocated_total: Decimal,
}

/// Request body for checking exact amounts against a total.
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateSplitRequest {
    /// Stated total.
    #[validate(custom(function = "validation::bounded_amount"))]
    pub total_amount: Decimal,
    /// Caller-supplied shares.
    #[validate(length(min = 1, message = "At least one amount is required"))]
    #[validate(custom(function = "validation::bounded_amounts"))]
    pub amounts: Vec<Decimal>,
}

/// Response for an amount check.
#[derive(Debug, Serialize)]
pub struct ValidateSplitResponse {
    /// Whether the amounts reconcile to the total.
    pub valid: bool,
    /// Total, rounded to cents.
    pub total_amount: Decimal,
    /// Sum of the amounts, rounded to cents.
    pub allocated_total: Decimal,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST `/splits/preview` - Compute per-participant shares.
async fn preview_split(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SplitPreviewRequest>,
) -> Result<Json<SplitPreviewResponse>, ApiError> {
    let input = SplitInput::try_from(request)?;

    let splits = state.calculator.calculate(&input).inspect_err(|e| {
        warn!(
            error = %e,
            reason = e.error_code(),
            split_type = %input.method(),
            "Split rejected"
        );
    })?;

    let allocated_total = round_money(splits.iter().map(|s| s.amount).sum());
    debug!(
        split_type = %input.method(),
        participants = splits.len(),
        %allocated_total,
        "Split computed"
    );

    Ok(Json(SplitPreviewResponse {
        split_type: input.method(),
        total_amount: round_money(input.total_amount()),
        splits,
        allocated_total,
    }))
}

/// POST `/splits/validate` - Check that exact amounts reconcile to a total.
async fn validate_split(
    ValidatedJson(request): ValidatedJson<ValidateSplitRequest>,
) -> Json<ValidateSplitResponse> {
    let valid = SplitCalculator::validate_split_amounts(request.total_amount, &request.amounts);

    Json(ValidateSplitResponse {
        valid,
        total_amount: round_money(request.total_amount),
        allocated_total: round_money(request.amounts.iter().copied().sum()),
    })
}
