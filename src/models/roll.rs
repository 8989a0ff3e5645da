use super::shift::Shift;
use crate::store::Record;
use crate::utils::time::hhmm;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// A roll currently in production (started, not yet closed).
///
/// Field names map to the legacy Spanish column headers so the on-disk
/// table and the EN_CURSO sheet keep their historical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    #[serde(rename = "bobina_id")]
    pub id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "turno")]
    pub shift: Shift,
    #[serde(rename = "maquina")]
    pub machine: u32,
    #[serde(rename = "lote_materia_prima")]
    pub raw_lot: String,
    #[serde(rename = "lote_of")]
    pub order_lot: String,
    #[serde(rename = "hora_inicio", with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(rename = "operario_inicio")]
    pub start_operator: String,
    #[serde(rename = "observaciones_inicio")]
    pub start_remarks: String,
}

impl Roll {
    /// Builds a fresh open roll with a generated identifier.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        shift: Shift,
        machine: u32,
        raw_lot: String,
        order_lot: String,
        start_time: NaiveTime,
        start_operator: String,
        start_remarks: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            shift,
            machine,
            raw_lot,
            order_lot,
            start_time,
            start_operator,
            start_remarks,
        }
    }

    /// Legacy selection label shown when picking a roll to close.
    pub fn label(&self) -> String {
        format!(
            "Máquina {} – OF {} – inicio {} (op: {})",
            self.machine,
            self.order_lot,
            time::fmt_time(self.start_time),
            self.start_operator
        )
    }

    /// Row appended to the EN_CURSO sheet, in its fixed column order.
    pub fn mirror_row(&self) -> Vec<Value> {
        vec![
            json!(self.id),
            json!(date::fmt_date(self.date)),
            json!(self.shift.label()),
            json!(self.machine),
            json!(self.raw_lot),
            json!(self.order_lot),
            json!(time::fmt_time(self.start_time)),
            json!(self.start_operator),
            json!(self.start_remarks),
        ]
    }
}

impl Record for Roll {
    const HEADERS: &'static [&'static str] = &[
        "bobina_id",
        "fecha",
        "turno",
        "maquina",
        "lote_materia_prima",
        "lote_of",
        "hora_inicio",
        "operario_inicio",
        "observaciones_inicio",
    ];

    fn key(&self) -> &str {
        &self.id
    }
}
