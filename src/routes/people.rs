use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchingEngine, TreeError};
use crate::models::{
    AddPersonRequest, AddPersonResponse, DumpResponse, ErrorResponse, HealthResponse, MatchRequest,
    PeopleResponse, SinglePeopleQuery, SuccessResponse,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
    pub matching: MatchingSettings,
}

/// Configure all people and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/people", web::post().to(add_person_and_find_match))
        .route("/people/{id}", web::delete().to(remove_person))
        .route("/people/{id}/singles", web::get().to(query_single_people))
        .route("/matches", web::post().to(match_people))
        .route("/debug/print", web::get().to(print));
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::PersonNotFound(_) | MatchError::Tree(TreeError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            MatchError::SameGender
            | MatchError::HeightIncompatible
            | MatchError::QuotaExhausted(_) => StatusCode::BAD_REQUEST,
            MatchError::Tree(TreeError::AlreadyExists(_)) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            MatchError::PersonNotFound(_) | MatchError::Tree(TreeError::NotFound(_)) => {
                "person_not_found"
            }
            MatchError::SameGender => "same_gender",
            MatchError::HeightIncompatible => "height_check_failed",
            MatchError::QuotaExhausted(_) => "wanted_date_limit",
            MatchError::Tree(TreeError::AlreadyExists(_)) => "person_exists",
        };
        let status = self.status_code();

        HttpResponse::build(status).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        population: state.engine.population(),
    })
}

/// Add a person and return their best match
///
/// POST /api/v1/people
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "height": 170.5,
///   "gender": "male|female",
///   "wantedDates": 2
/// }
/// ```
async fn add_person_and_find_match(
    state: web::Data<AppState>,
    req: web::Json<AddPersonRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for add person request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.engine.add_person_and_find_match(req.into_inner().into()) {
        Ok((person, matches)) => HttpResponse::Ok().json(AddPersonResponse {
            person: person.view(),
            matches: matches.iter().map(|p| p.view()).collect(),
        }),
        Err(e) => {
            tracing::error!("Failed to add person: {}", e);
            e.error_response()
        }
    }
}

/// DELETE /api/v1/people/{id}
async fn remove_person(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let id = path.into_inner();

    match state.engine.remove_person(id) {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse { success: true }),
        Err(e) => {
            tracing::info!("Failed to remove person {}: {}", id, e);
            e.error_response()
        }
    }
}

/// Compatible single people for a person
///
/// GET /api/v1/people/{id}/singles?num={num}
async fn query_single_people(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<SinglePeopleQuery>,
) -> impl Responder {
    let id = path.into_inner();
    let limit = state.matching.effective_limit(query.num);

    match state.engine.query_single_people(id, limit) {
        Ok(people) => HttpResponse::Ok().json(PeopleResponse {
            people: people.iter().map(|p| p.view()).collect(),
        }),
        Err(e) => {
            tracing::info!("Failed to query single people for {}: {}", id, e);
            e.error_response()
        }
    }
}

/// POST /api/v1/matches
async fn match_people(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    match state.engine.match_people(req.id1, req.id2) {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse { success: true }),
        Err(e) => e.error_response(),
    }
}

/// Dump both trees
///
/// GET /api/v1/debug/print
async fn print(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DumpResponse::from(state.engine.dump()))
}
