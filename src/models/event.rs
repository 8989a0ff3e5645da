use super::event_kind::EventKind;
use super::shift::Shift;
use crate::store::Record;
use crate::utils::time::hhmm;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// A line event (stoppage, breakage, cleaning, material change...).
/// One record per submission, never mutated or deleted.
///
/// `shift` and `order_lot` are not asked on the form: they are copied
/// from the open roll on the same machine, when one exists. `stop_meter`
/// stays local; the EVENTOS sheet never carried it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "evento_id")]
    pub id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "turno")]
    pub shift: Option<Shift>,
    #[serde(rename = "maquina")]
    pub machine: u32,
    #[serde(rename = "lote_of")]
    pub order_lot: String,
    #[serde(rename = "tipo")]
    pub kind: EventKind,
    #[serde(rename = "hora_inicio", with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(rename = "hora_fin", with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(rename = "minutos")]
    pub minutes: i64,
    #[serde(rename = "operario")]
    pub operator: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "metro_paro")]
    pub stop_meter: String,
}

impl Event {
    /// Builds a new event with a generated identifier. The duration is
    /// derived here from the two times (single midnight rollover).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: EventKind,
        date: NaiveDate,
        shift: Option<Shift>,
        machine: u32,
        order_lot: String,
        start_time: NaiveTime,
        end_time: NaiveTime,
        operator: String,
        description: String,
        stop_meter: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            shift,
            machine,
            order_lot,
            kind,
            start_time,
            end_time,
            minutes: time::minutes_between(start_time, end_time),
            operator,
            description,
            stop_meter,
        }
    }

    /// Row appended to the EVENTOS sheet. Legacy column order, without
    /// the local-only identifier and stop-meter fields.
    pub fn mirror_row(&self) -> Vec<Value> {
        vec![
            json!(date::fmt_date(self.date)),
            json!(self.shift.map(|s| s.label()).unwrap_or_default()),
            json!(self.machine),
            json!(self.order_lot),
            json!(self.kind.label()),
            json!(time::fmt_time(self.start_time)),
            json!(time::fmt_time(self.end_time)),
            json!(self.minutes),
            json!(self.operator),
            json!(self.description),
        ]
    }
}

impl Record for Event {
    const HEADERS: &'static [&'static str] = &[
        "evento_id",
        "fecha",
        "turno",
        "maquina",
        "lote_of",
        "tipo",
        "hora_inicio",
        "hora_fin",
        "minutos",
        "operario",
        "descripcion",
        "metro_paro",
    ];

    fn key(&self) -> &str {
        &self.id
    }
}
