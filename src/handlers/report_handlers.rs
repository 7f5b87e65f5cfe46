use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::errors::AppError;
use crate::ledger;
use crate::models::document::Document;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct Reports {
    pub member_count: usize,
    pub session_count: usize,
    pub total_attendance: usize,
    pub average_occupancy_pct: u32,
    pub top_attendees: Vec<TopAttendee>,
}

#[derive(Debug, Serialize)]
pub struct TopAttendee {
    pub member_id: String,
    pub name: String,
    pub attended: usize,
}

/// GET /api/reports - club-wide statistics for the reports view
pub async fn summary(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.read(build_reports)))
}

fn build_reports(doc: &Document) -> Reports {
    let total_attendance = doc
        .attendance
        .values()
        .map(|roster| roster.values().filter(|r| r.attended).count())
        .sum();

    // Sessions without a capacity count as 0% occupied in the average.
    let average_occupancy_pct = if doc.sessions.is_empty() {
        0
    } else {
        let sum: f64 = doc
            .sessions
            .iter()
            .map(|s| {
                if s.capacity == 0 {
                    0.0
                } else {
                    ledger::registered_count(doc, &s.id) as f64 / s.capacity as f64
                }
            })
            .sum();
        ((sum / doc.sessions.len() as f64) * 100.0).round() as u32
    };

    let mut top_attendees: Vec<TopAttendee> = doc
        .members
        .iter()
        .map(|m| TopAttendee {
            member_id: m.id.clone(),
            name: m.name.clone(),
            attended: doc
                .attendance
                .values()
                .filter(|roster| roster.get(&m.id).is_some_and(|r| r.attended))
                .count(),
        })
        .collect();
    top_attendees.sort_by(|a, b| b.attended.cmp(&a.attended).then_with(|| a.name.cmp(&b.name)));
    top_attendees.truncate(9);

    Reports {
        member_count: doc.members.len(),
        session_count: doc.sessions.len(),
        total_attendance,
        average_occupancy_pct,
        top_attendees,
    }
}
