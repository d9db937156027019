pub mod envelope;

use crate::application::{CsvImportUseCase, TeamSeasonUseCase};
use crate::domain::error::AppError;
use crate::domain::team_season::TeamSeasonInput;
use actix_cors::Cors;
use actix_web::{dev::Server, error, get, post, web, App, HttpResponse, HttpServer, Responder};
use envelope::{bad_request, not_found, ok, ok_with, server_error, YearListResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

pub struct HttpState {
    pub team_seasons: Arc<TeamSeasonUseCase>,
    pub importer: Arc<CsvImportUseCase>,
}

#[derive(Deserialize)]
pub struct YearRequest {
    pub year: i64,
}

#[derive(Deserialize)]
pub struct ThresholdRequest {
    pub threshold: f64,
}

#[derive(Deserialize)]
pub struct StatsPath {
    pub team: String,
    pub year: i64,
}

/// Maps use case failures onto envelopes.
fn failure_response(source: &str, err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound(_) => not_found(),
        other => server_error(source, other),
    }
}

#[post("/init")]
async fn import_csv(data: web::Data<HttpState>) -> impl Responder {
    info!("Importing season CSV");

    match data.importer.execute().await {
        Ok(report) => ok_with(report),
        Err(e) => server_error("Import", e),
    }
}

#[post("/football/add")]
async fn add_team(
    data: web::Data<HttpState>,
    req: web::Json<TeamSeasonInput>,
) -> impl Responder {
    let input = req.into_inner();
    info!(team = %input.team, year = input.year, "Adding team season");

    match data.team_seasons.add(input).await {
        Ok(_) => ok(),
        Err(e) => failure_response("AddTeam", e),
    }
}

#[post("/football/team/get")]
async fn list_by_year(data: web::Data<HttpState>, req: web::Json<YearRequest>) -> impl Responder {
    info!(year = req.year, "Listing team seasons");

    match data.team_seasons.list_by_year(req.year).await {
        Ok(summary) => HttpResponse::Ok().json(YearListResponse {
            success: true,
            result: summary.records,
            average_goals_for: summary.average_goals_for,
        }),
        Err(e) => failure_response("ListByYear", e),
    }
}

#[post("/football/team/get/thresholdwin")]
async fn threshold_win(
    data: web::Data<HttpState>,
    req: web::Json<ThresholdRequest>,
) -> impl Responder {
    info!(threshold = req.threshold, "Querying by win threshold");

    match data.team_seasons.with_min_wins(req.threshold).await {
        Ok(records) => ok_with(records),
        Err(e) => failure_response("ThresholdWin", e),
    }
}

#[get("/football/team/get/{name}")]
async fn get_by_name(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    info!(team = %name, "Fetching team seasons");

    match data.team_seasons.find_by_team(&name).await {
        Ok(records) => ok_with(records),
        Err(e) => failure_response("GetByName", e),
    }
}

#[post("/football/team/update/{id}")]
async fn update_team(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<TeamSeasonInput>,
) -> impl Responder {
    let id = path.into_inner();
    info!(id = %id, "Updating team season");

    match data.team_seasons.update(&id, req.into_inner()).await {
        Ok(()) => ok(),
        Err(e) => failure_response("UpdateTeam", e),
    }
}

#[post("/football/team/delete/{id}")]
async fn delete_team(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    info!(id = %id, "Deleting team season");

    match data.team_seasons.delete(&id).await {
        Ok(()) => ok(),
        Err(e) => failure_response("DeleteTeam", e),
    }
}

#[get("/football/stats/{team}/{year}")]
async fn team_stats(data: web::Data<HttpState>, path: web::Path<StatsPath>) -> impl Responder {
    info!(team = %path.team, year = path.year, "Fetching team stats");

    match data.team_seasons.stats(&path.team, path.year).await {
        Ok(stats) => ok_with(stats),
        Err(e) => failure_response("TeamStats", e),
    }
}

/// Registers every route plus the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request("body", err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = bad_request("path", err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .service(import_csv)
    .service(add_team)
    .service(list_by_year)
    .service(threshold_win)
    .service(get_by_name)
    .service(update_team)
    .service(delete_team)
    .service(team_stats);
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    info!(host, port, "HTTP server listening");
    Ok(server)
}
