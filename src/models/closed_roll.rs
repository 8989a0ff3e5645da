use super::roll::Roll;
use super::shift::Shift;
use crate::store::Record;
use crate::utils::time::hhmm;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A finished roll: the open fields plus the close form. Written once,
/// never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedRoll {
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
    #[serde(rename = "hora_fin", with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(rename = "operario_fin")]
    pub end_operator: String,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "taras")]
    pub tares: u32,
    #[serde(rename = "observaciones")]
    pub end_remarks: String,
}

impl ClosedRoll {
    /// Builds the closed record from the open roll it supersedes.
    pub fn from_open(
        roll: Roll,
        end_time: NaiveTime,
        end_operator: String,
        weight: f64,
        tares: u32,
        end_remarks: String,
    ) -> Self {
        Self {
            id: roll.id,
            date: roll.date,
            shift: roll.shift,
            machine: roll.machine,
            raw_lot: roll.raw_lot,
            order_lot: roll.order_lot,
            start_time: roll.start_time,
            start_operator: roll.start_operator,
            start_remarks: roll.start_remarks,
            end_time,
            end_operator,
            weight,
            tares,
            end_remarks,
        }
    }

    /// Legacy label of the roll this record closed.
    pub fn label(&self) -> String {
        format!(
            "Máquina {} – OF {} – inicio {} (op: {})",
            self.machine,
            self.order_lot,
            time::fmt_time(self.start_time),
            self.start_operator
        )
    }

    /// Row appended to the BOBINAS sheet, in its fixed column order.
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
            json!(time::fmt_time(self.end_time)),
            json!(self.end_operator),
            json!(self.weight),
            json!(self.tares),
            json!(self.end_remarks),
        ]
    }
}

impl Record for ClosedRoll {
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
        "hora_fin",
        "operario_fin",
        "peso",
        "taras",
        "observaciones",
    ];

    fn key(&self) -> &str {
        &self.id
    }
}
