use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Listing row for GET /adopciones; the backend resolves the animal and
/// adopter names server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: i64,
    #[serde(rename = "fechaAdopcion")]
    pub date: NaiveDate,
    #[serde(rename = "nombreAnimal")]
    pub animal_name: String,
    #[serde(rename = "nombreAdoptante")]
    pub adopter_name: String,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdoptionDraft {
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "personaAdoptanteId")]
    pub adopter_id: i64,
    #[serde(rename = "fechaAdopcion")]
    pub date: NaiveDate,
    #[serde(rename = "observaciones")]
    pub notes: String,
}
