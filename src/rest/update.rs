//! Bulk updates and their audit log.
//!
//! Every write appends one line to an [`AuditLog`]:
//!
//! ```text
//! 42 ::: status 200
//! 43 ::: status 200
//! ```
//!
//! Writes are not grouped: when a write fails for good, the batch stops and
//! the writes before it stay applied.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightspeed_api::rest::update::{update_items, AuditLog};
//! use serde_json::json;
//!
//! let mut audit = AuditLog::open("updateditems.csv")?;
//! let report = update_items(&client, &["42", "43"], &json!({"categoryID": "12"}), &mut audit).await?;
//! audit.finish()?;
//! println!("{} of {} updated", report.succeeded(), report.outcomes.len());
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::auth::AccessTokenSource;
use crate::clients::rest::{RestClient, RestError};
use crate::rest::resource::LightspeedResource;
use crate::rest::resources::{Item, Order};

/// Append-only record of writes, one `<id> ::: status <code>` line each.
///
/// Lines are flushed as they are written, so the log is complete up to the
/// last write even if the batch is interrupted.
#[derive(Debug)]
pub struct AuditLog<W: Write = BufWriter<File>> {
    writer: W,
    lines: usize,
}

impl AuditLog<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RestError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AuditLog<W> {
    /// Wraps any writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Appends `<id> ::: status <status>`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Io`] if the line cannot be written.
    pub fn record(&mut self, id: &str, status: u16) -> Result<(), RestError> {
        writeln!(self.writer, "{id} ::: status {status}")?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written through this log.
    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W, RestError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Final status of one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Identifier of the updated record.
    pub id: String,
    /// HTTP status of the last response for this record.
    pub status: u16,
}

impl UpdateOutcome {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// Outcomes of a batch, in the order the writes were issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub outcomes: Vec<UpdateOutcome>,
}

impl UpdateReport {
    /// Number of successful writes.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Writes that did not return a 2xx status.
    pub fn failed(&self) -> impl Iterator<Item = &UpdateOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Sends `PUT Item/{id}.json` with `fields` for every id.
///
/// Each write goes through the controller: it is throttled against the
/// bucket and retried after error envelopes (including one token refresh
/// per expired-token envelope). One audit line is written per id with the
/// final status.
///
/// # Errors
///
/// Stops at the first write that fails for good and returns its error:
/// [`RestError::MaxRetries`] (its last status is still logged),
/// [`RestError::Auth`], [`RestError::Http`] or [`RestError::Io`].
pub async fn update_items<T, S, W>(
    client: &RestClient<T>,
    ids: &[S],
    fields: &Value,
    audit: &mut AuditLog<W>,
) -> Result<UpdateReport, RestError>
where
    T: AccessTokenSource,
    S: AsRef<str>,
    W: Write,
{
    let mut report = UpdateReport::default();

    for id in ids {
        let id = id.as_ref();
        let status = put_and_record(client, &Item::record_path(id), id, fields.clone(), audit)
            .await?;
        report.outcomes.push(UpdateOutcome {
            id: id.to_string(),
            status,
        });
    }

    tracing::debug!(
        updated = report.succeeded(),
        total = report.outcomes.len(),
        "Finished item updates"
    );
    Ok(report)
}

/// Writes an order's buyer note back to Lightspeed.
///
/// Sends `PUT Order/{id}.json` with `{"Note": {"noteID", "note"}}` where the
/// note is [`Order::buyer_note`]. Orders without an id, without a buyer and
/// reference number, or whose note is already annotated are skipped and
/// return `Ok(None)`.
///
/// # Errors
///
/// Same as [`update_items`].
pub async fn update_order_note<T, W>(
    client: &RestClient<T>,
    order: &Order,
    audit: &mut AuditLog<W>,
) -> Result<Option<u16>, RestError>
where
    T: AccessTokenSource,
    W: Write,
{
    let (Some(order_id), Some(note)) = (order.id(), order.buyer_note()) else {
        tracing::debug!(order_id = ?order.id(), "Skipping order note update");
        return Ok(None);
    };

    let note_id = order
        .note
        .as_ref()
        .and_then(|n| n.note_id.clone())
        .or_else(|| order.note_id.clone());

    let body = json!({
        "Note": {
            "noteID": note_id,
            "note": note,
        }
    });

    let status = put_and_record(client, &Order::record_path(order_id), order_id, body, audit)
        .await?;
    Ok(Some(status))
}

/// Runs [`update_order_note`] for every order.
///
/// Skipped orders do not appear in the report.
///
/// # Errors
///
/// Same as [`update_items`].
pub async fn update_order_notes<T, W>(
    client: &RestClient<T>,
    orders: &[Order],
    audit: &mut AuditLog<W>,
) -> Result<UpdateReport, RestError>
where
    T: AccessTokenSource,
    W: Write,
{
    let mut report = UpdateReport::default();
    for order in orders {
        if let Some(status) = update_order_note(client, order, audit).await? {
            report.outcomes.push(UpdateOutcome {
                id: order.id().unwrap_or_default().to_string(),
                status,
            });
        }
    }
    Ok(report)
}

async fn put_and_record<T, W>(
    client: &RestClient<T>,
    path: &str,
    id: &str,
    body: Value,
    audit: &mut AuditLog<W>,
) -> Result<u16, RestError>
where
    T: AccessTokenSource,
    W: Write,
{
    match client.put(path, body).await {
        Ok(response) => {
            audit.record(id, response.code)?;
            Ok(response.code)
        }
        Err(RestError::MaxRetries {
            path,
            attempts,
            last_status,
        }) => {
            audit.record(id, last_status)?;
            tracing::warn!(id, last_status, "Giving up on write");
            Err(RestError::MaxRetries {
                path,
                attempts,
                last_status,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_line_format() {
        let mut audit = AuditLog::new(Vec::new());
        audit.record("42", 200).unwrap();
        audit.record("43", 422).unwrap();
        assert_eq!(audit.lines(), 2);

        let written = String::from_utf8(audit.finish().unwrap()).unwrap();
        assert_eq!(written, "42 ::: status 200\n43 ::: status 422\n");
    }

    #[test]
    fn test_audit_log_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updateditems.csv");
        std::fs::write(&path, "1 ::: status 200\n").unwrap();

        let mut audit = AuditLog::open(&path).unwrap();
        audit.record("2", 200).unwrap();
        audit.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1 ::: status 200\n2 ::: status 200\n");
    }

    #[test]
    fn test_report_counts() {
        let report = UpdateReport {
            outcomes: vec![
                UpdateOutcome {
                    id: "1".to_string(),
                    status: 200,
                },
                UpdateOutcome {
                    id: "2".to_string(),
                    status: 404,
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        let failed: Vec<_> = report.failed().map(|o| o.id.as_str()).collect();
        assert_eq!(failed, vec!["2"]);
    }
}
