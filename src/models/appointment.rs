use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The backend speaks zone-less local datetimes. It replies with second (or
/// fractional) precision but expects minute precision on writes, so the two
/// directions use different formats.
pub mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M";
    const READ_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised datetime: {raw}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fechaHoraInicio", with = "wire_datetime")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "fechaHoraFin", with = "wire_datetime")]
    pub ends_at: NaiveDateTime,
    #[serde(rename = "personaAdoptanteId")]
    pub adopter_id: i64,
}

/// Body for POST /citas and PUT /citas/{id}. The title is always the selected
/// adopter's name; the backend does not derive it.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fechaHoraInicio", with = "wire_datetime")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "fechaHoraFin", with = "wire_datetime")]
    pub ends_at: NaiveDateTime,
    #[serde(rename = "personaAdoptanteId")]
    pub adopter_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn reads_backend_datetimes_with_and_without_seconds() {
        let with_seconds: Appointment = serde_json::from_str(
            r#"{"id":1,"titulo":"Ana","descripcion":"visita","fechaHoraInicio":"2025-08-01T10:00:00","fechaHoraFin":"2025-08-01T11:00","personaAdoptanteId":7}"#,
        )
        .unwrap();
        assert_eq!(with_seconds.starts_at, at(10, 0));
        assert_eq!(with_seconds.ends_at, at(11, 0));
    }

    #[test]
    fn writes_minute_precision() {
        let draft = AppointmentDraft {
            title: "Ana".into(),
            description: "visita".into(),
            starts_at: at(10, 0),
            ends_at: at(11, 30),
            adopter_id: 7,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["fechaHoraInicio"], "2025-08-01T10:00");
        assert_eq!(json["fechaHoraFin"], "2025-08-01T11:30");
    }
}
