use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adopter {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdopterDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
}
