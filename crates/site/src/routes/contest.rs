//! Vacation photo contest.
//!
//! Entries are multipart posts carrying the entrant's name and email plus a
//! `photo` file. Entries are logged; nothing is stored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{
        Multipart, Path,
        multipart::{MultipartError, MultipartRejection},
    },
    response::{IntoResponse, Redirect},
};
use chrono::Datelike;
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// Contest entry form template.
#[derive(Template, WebTemplate)]
#[template(path = "contest/vacation_photo.html")]
pub struct VacationPhotoTemplate {
    pub ctx: PageContext,
    pub year: i32,
    pub month: u32,
}

/// Contest thank-you template.
#[derive(Template, WebTemplate)]
#[template(path = "contest/vacation_photo_thank_you.html")]
pub struct VacationPhotoThankYouTemplate {
    pub ctx: PageContext,
}

/// Contest upload error template.
#[derive(Template, WebTemplate)]
#[template(path = "contest/vacation_photo_error.html")]
pub struct VacationPhotoErrorTemplate {
    pub ctx: PageContext,
}

/// Fields collected from a contest entry.
#[derive(Debug, Default)]
pub struct ContestEntry {
    pub name: String,
    pub email: String,
    pub photos: Vec<UploadedPhoto>,
}

/// Metadata of an uploaded photo.
#[derive(Debug)]
pub struct UploadedPhoto {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// Display the contest entry form for the current month.
#[instrument(skip(ctx))]
pub async fn form(ctx: PageContext) -> impl IntoResponse {
    let now = chrono::Utc::now();
    VacationPhotoTemplate {
        ctx,
        year: now.year(),
        month: now.month(),
    }
}

/// Accept a contest entry.
///
/// Redirects to the error page if the body cannot be parsed, otherwise to
/// the thank-you page.
#[instrument(skip(multipart))]
pub async fn submit(
    Path((year, month)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Redirect {
    let entry = match multipart {
        Ok(multipart) => read_entry(multipart).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Contest entry is not multipart");
            return Redirect::to("/contest/vacation-photo/error");
        }
    };

    match entry {
        Ok(entry) => {
            tracing::info!(
                %year,
                %month,
                name = %entry.name,
                email = %entry.email,
                photos = ?entry.photos,
                "Contest entry received"
            );
            Redirect::to("/contest/vacation-photo/thank-you")
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse contest entry");
            Redirect::to("/contest/vacation-photo/error")
        }
    }
}

/// Display the contest thank-you page.
#[instrument(skip(ctx))]
pub async fn thank_you(ctx: PageContext) -> impl IntoResponse {
    VacationPhotoThankYouTemplate { ctx }
}

/// Display the contest upload error page.
#[instrument(skip(ctx))]
pub async fn error(ctx: PageContext) -> impl IntoResponse {
    VacationPhotoErrorTemplate { ctx }
}

/// Drain every multipart field into a [`ContestEntry`].
async fn read_entry(mut multipart: Multipart) -> Result<ContestEntry, MultipartError> {
    let mut entry = ContestEntry::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => entry.name = field.text().await?,
            "email" => entry.email = field.text().await?,
            "photo" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let size = field.bytes().await?.len();
                entry.photos.push(UploadedPhoto {
                    file_name,
                    content_type,
                    size,
                });
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unexpected contest field");
                field.bytes().await?;
            }
        }
    }

    Ok(entry)
}
