//! Plain-text rendering of the dashboard views.
//!
//! Every function returns a `String` so the binary only prints and tests
//! can assert on the exact output.

use crate::actions::Action;
use crate::aggregate::Aggregated;
use crate::consts::dashboard_consts::{DETAIL_REVIEW_LIMIT, MAX_RATING, PLACEHOLDER};
use crate::models::{Pet, Review, SitterDetails, User};
use crate::views::BookingRow;
use crate::views::admin::{AdminOverview, ModerationCard, SitterDetailView, SitterRow};
use crate::views::owner::{BookingReview, OwnerOverview, ServiceHit};
use crate::views::sitter::{SitterOverview, SitterReviews};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// `floor(rating)` filled stars padded with empty ones up to the maximum.
pub fn stars(rating: f64) -> String {
    let max = usize::from(MAX_RATING);
    let filled = if rating.is_finite() && rating > 0.0 {
        (rating.floor() as usize).min(max)
    } else {
        0
    };
    format!("{}{}", "★".repeat(filled), "☆".repeat(max - filled))
}

pub fn service_type_name(kind: &str) -> &str {
    match kind {
        "walking" => "Dog walking",
        "boarding" => "Boarding",
        "home-care" => "Home care",
        other => other,
    }
}

pub fn date_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

fn date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn actions_cell(actions: &[Action]) -> String {
    if actions.is_empty() {
        return PLACEHOLDER.to_string();
    }
    actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Left-aligned columns separated by two spaces, with a dashed rule under the header.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn section(title: &str) -> String {
    format!("== {} ==\n", title)
}

fn failure_note<V>(aggregated: &Aggregated<V>) -> String {
    if aggregated.failed == 0 {
        return String::new();
    }
    format!(
        "\nNote: {} related request(s) failed; affected fields show defaults.\n",
        aggregated.failed
    )
}

fn empty(message: &str) -> String {
    format!("{}\n", message)
}

pub fn admin_overview(overview: &AdminOverview) -> String {
    let mut out = section("Overview");
    let _ = writeln!(out, "Users:            {}", overview.total_users);
    let _ = writeln!(out, "Sitters:          {}", overview.total_sitters);
    let _ = writeln!(out, "Pending sitters:  {}", overview.pending_sitters);
    let _ = writeln!(out, "Approved sitters: {}", overview.approved_sitters);
    out.push('\n');
    out.push_str(&section("Recent users"));
    if overview.recent_users.is_empty() {
        out.push_str(&empty("No users yet."));
    } else {
        out.push_str(&users(&overview.recent_users));
    }
    out
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return empty("No users found.");
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                format!("#{}", u.user_id),
                u.full_name.clone(),
                u.email.clone(),
                u.role.to_string(),
                date(&u.created_at),
            ]
        })
        .collect();
    table(&["ID", "Name", "Email", "Role", "Registered"], &rows)
}

pub fn sitter_roster(roster: &Aggregated<SitterRow>) -> String {
    if roster.views.is_empty() {
        return empty("No sitters registered.");
    }
    let rows: Vec<Vec<String>> = roster
        .views
        .iter()
        .map(|s| {
            vec![
                format!("#{}", s.sitter_id),
                s.full_name.clone(),
                s.email.clone(),
                s.location.clone(),
                format!("{} yr", s.experience_years),
                format!("{} {:.1} ({})", stars(s.rating), s.rating, s.review_count),
                s.status.to_string(),
            ]
        })
        .collect();
    let mut out = table(
        &["ID", "Name", "Email", "Location", "Experience", "Rating", "Status"],
        &rows,
    );
    out.push_str(&failure_note(roster));
    out
}

pub fn moderation_queue(queue: &Aggregated<ModerationCard>) -> String {
    if queue.views.is_empty() {
        return empty("No applications awaiting moderation.");
    }
    let mut out = String::new();
    for card in &queue.views {
        let _ = writeln!(out, "#{} {}", card.sitter_id, card.full_name);
        let _ = writeln!(out, "  Email:        {}", card.email);
        let _ = writeln!(out, "  Phone:        {}", card.phone);
        let _ = writeln!(out, "  Experience:   {} yr", card.experience_years);
        let _ = writeln!(out, "  Location:     {}", card.location);
        let _ = writeln!(out, "  Certificates: {}", card.certificates);
        let _ = writeln!(out, "  Actions:      {}", actions_cell(card.actions));
        out.push('\n');
    }
    out.push_str(&failure_note(queue));
    out
}

pub fn sitter_detail(detail: &SitterDetailView) -> String {
    let mut out = section(&format!("Sitter #{}", detail.sitter_id));
    let _ = writeln!(out, "Name:       {}", detail.full_name);
    let _ = writeln!(out, "Email:      {}", detail.email);
    let _ = writeln!(out, "Phone:      {}", detail.phone);
    let _ = writeln!(out, "Experience: {} yr", detail.experience_years);
    let _ = writeln!(out, "Location:   {}", detail.location);
    let _ = writeln!(out, "Status:     {}", detail.status);
    let _ = writeln!(out, "Actions:    {}", actions_cell(detail.actions));

    out.push('\n');
    out.push_str(&section("Services"));
    out.push_str(&services(
        detail
            .services
            .iter()
            .map(|s| (s.kind.as_str(), s.price_per_hour, s.description.as_str())),
    ));

    out.push('\n');
    out.push_str(&section("Latest reviews"));
    out.push_str(&review_list(
        &detail.reviews[..detail.reviews.len().min(DETAIL_REVIEW_LIMIT)],
    ));
    out
}

fn services<'a>(items: impl Iterator<Item = (&'a str, f64, &'a str)>) -> String {
    let rows: Vec<Vec<String>> = items
        .map(|(kind, price, description)| {
            vec![
                service_type_name(kind).to_string(),
                format!("{:.0}/h", price),
                if description.trim().is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    description.to_string()
                },
            ]
        })
        .collect();
    if rows.is_empty() {
        return empty("No services.");
    }
    table(&["Service", "Price", "Description"], &rows)
}

fn review_list(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return empty("No reviews yet.");
    }
    let mut out = String::new();
    for review in reviews {
        let _ = writeln!(
            out,
            "{} booking #{} {}",
            stars(review.rating as f64),
            review.booking_id,
            date(&review.created_at)
        );
        if !review.comment.trim().is_empty() {
            let _ = writeln!(out, "  {}", review.comment.trim());
        }
    }
    out
}

fn booking_rows(rows: &[BookingRow], with_actions: bool) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let b = &row.booking;
            let mut cells = vec![
                format!("#{}", b.booking_id),
                format!("pet #{}", b.pet_id),
                format!("sitter #{}", b.sitter_id),
                date_time(&b.start_time),
                date_time(&b.end_time),
                b.status.to_string(),
            ];
            if with_actions {
                cells.push(actions_cell(&row.actions));
            }
            cells
        })
        .collect();
    if with_actions {
        table(
            &["ID", "Pet", "Sitter", "Start", "End", "Status", "Actions"],
            &cells,
        )
    } else {
        table(&["ID", "Pet", "Sitter", "Start", "End", "Status"], &cells)
    }
}

pub fn bookings(rows: &[BookingRow]) -> String {
    if rows.is_empty() {
        return empty("No bookings yet.");
    }
    booking_rows(rows, true)
}

/// Owner bookings, noting review lookups that failed.
pub fn owner_bookings(rows: &Aggregated<BookingRow>) -> String {
    let mut out = bookings(&rows.views);
    out.push_str(&failure_note(rows));
    out
}

pub fn owner_overview(overview: &OwnerOverview) -> String {
    let mut out = section("Overview");
    let _ = writeln!(out, "Pets:     {}", overview.pet_count);
    let _ = writeln!(out, "Bookings: {}", overview.booking_count);
    out.push('\n');
    out.push_str(&section("Recent bookings"));
    if overview.recent_bookings.is_empty() {
        out.push_str(&empty("No bookings yet."));
    } else {
        let rows: Vec<BookingRow> = overview
            .recent_bookings
            .iter()
            .cloned()
            .map(|booking| BookingRow {
                booking,
                actions: Vec::new(),
            })
            .collect();
        out.push_str(&booking_rows(&rows, false));
    }
    out
}

pub fn pets(pets: &[Pet]) -> String {
    if pets.is_empty() {
        return empty("No pets yet.");
    }
    let rows: Vec<Vec<String>> = pets
        .iter()
        .map(|p| {
            vec![
                format!("#{}", p.pet_id),
                p.name.clone(),
                p.kind.clone(),
                p.age.to_string(),
                if p.notes.trim().is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    p.notes.clone()
                },
            ]
        })
        .collect();
    table(&["ID", "Name", "Type", "Age", "Notes"], &rows)
}

pub fn owner_reviews(entries: &Aggregated<BookingReview>) -> String {
    if entries.views.is_empty() {
        return empty("No completed bookings to review.");
    }
    let mut out = String::new();
    for entry in &entries.views {
        let b = &entry.booking;
        let _ = writeln!(
            out,
            "Booking #{} with sitter #{} on {}",
            b.booking_id,
            b.sitter_id,
            date_time(&b.start_time)
        );
        match &entry.review {
            Some(review) => {
                let _ = writeln!(
                    out,
                    "  Review #{}: {}",
                    review.review_id,
                    stars(review.rating as f64)
                );
                if !review.comment.trim().is_empty() {
                    let _ = writeln!(out, "  {}", review.comment.trim());
                }
            }
            None => {
                let _ = writeln!(out, "  No review yet.");
            }
        }
        let _ = writeln!(out, "  Actions: {}", actions_cell(entry.actions));
        out.push('\n');
    }
    out.push_str(&failure_note(entries));
    out
}

pub fn service_hits(hits: &[ServiceHit]) -> String {
    if hits.is_empty() {
        return empty("No services found.");
    }
    let mut out = String::new();
    for hit in hits {
        let _ = writeln!(out, "{} (sitter #{})", hit.sitter_name, hit.sitter_id);
        let _ = writeln!(out, "  {} ({:.1})", stars(hit.sitter_rating), hit.sitter_rating);
        let _ = writeln!(out, "  Service: {}", service_type_name(&hit.kind));
        let _ = writeln!(out, "  Price:   {:.0}/h", hit.price_per_hour);
        let _ = writeln!(out, "  {}", hit.description);
        let _ = writeln!(out, "  Service ID: {}", hit.service_id);
        out.push('\n');
    }
    out
}

fn rating_line(rating: f64, count: i64, loaded: bool) -> String {
    if loaded {
        format!("{} {:.1} ({} reviews)", stars(rating), rating, count)
    } else {
        format!("{} {:.1} (rating unavailable)", stars(rating), rating)
    }
}

pub fn sitter_overview(overview: &SitterOverview) -> String {
    let mut out = section("Overview");
    let _ = writeln!(out, "Services: {}", overview.services.len());
    let _ = writeln!(out, "Bookings: {}", overview.booking_count);
    let _ = writeln!(
        out,
        "Rating:   {}",
        rating_line(
            overview.rating.average_rating,
            overview.rating.review_count,
            overview.rating_loaded
        )
    );
    out.push('\n');
    out.push_str(&section("Pending requests"));
    if overview.pending_requests.is_empty() {
        out.push_str(&empty("No pending requests."));
    } else {
        out.push_str(&booking_rows(&overview.pending_requests, true));
    }
    out.push('\n');
    out.push_str(&section("Services"));
    out.push_str(&services(
        overview
            .services
            .iter()
            .map(|s| (s.kind.as_str(), s.price_per_hour, s.description.as_str())),
    ));
    out
}

pub fn sitter_reviews(view: &SitterReviews) -> String {
    let mut out = format!(
        "Rating: {}\n\n",
        rating_line(
            view.rating.average_rating,
            view.rating.review_count,
            view.rating_loaded
        )
    );
    out.push_str(&review_list(&view.reviews));
    out
}

pub fn sitter_profile(details: &SitterDetails) -> String {
    let text = |value: &str| {
        if value.trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            value.to_string()
        }
    };
    let mut out = section("Profile");
    let _ = writeln!(out, "Name:         {}", text(&details.full_name));
    let _ = writeln!(out, "Email:        {}", text(&details.email));
    let _ = writeln!(out, "Phone:        {}", text(&details.phone));
    let _ = writeln!(out, "Experience:   {} yr", details.sitter.experience_years);
    let _ = writeln!(out, "Location:     {}", text(&details.sitter.location));
    let _ = writeln!(out, "Certificates: {}", text(&details.sitter.certificates));
    let _ = writeln!(out, "Preferences:  {}", text(&details.sitter.preferences));
    let _ = writeln!(out, "Status:       {}", details.sitter.status);
    out
}
