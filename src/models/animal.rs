use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "MACHO")]
    Male,
    #[serde(rename = "HEMBRA")]
    Female,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Macho",
            Sex::Female => "Hembra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeUnit {
    #[serde(rename = "MESES")]
    Months,
    #[serde(rename = "ANIOS")]
    Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalStatus {
    #[serde(rename = "DISPONIBLE")]
    Available,
    #[serde(rename = "ADOPTADO")]
    Adopted,
    #[serde(rename = "EN_TRATAMIENTO")]
    InTreatment,
}

impl AnimalStatus {
    /// Label shown in the listing; free-text search matches against it.
    pub fn label(&self) -> &'static str {
        match self {
            AnimalStatus::Available => "Disponible",
            AnimalStatus::Adopted => "Adoptado",
            AnimalStatus::InTreatment => "En tratamiento",
        }
    }
}

/// Age bucket derived from the stored age value + unit, used as a listing
/// facet. Anything measured in months is young; so is a one-year-old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    Young,
    Adult,
    Senior,
}

impl LifeStage {
    pub fn from_age(value: u32, unit: AgeUnit) -> LifeStage {
        match unit {
            AgeUnit::Months => LifeStage::Young,
            AgeUnit::Years if value <= 1 => LifeStage::Young,
            AgeUnit::Years if value <= 8 => LifeStage::Adult,
            AgeUnit::Years => LifeStage::Senior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifeStage::Young => "Cachorro",
            LifeStage::Adult => "Adulto",
            LifeStage::Senior => "Senior",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raza")]
    pub breed: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "edadValor")]
    pub age_value: u32,
    #[serde(rename = "edadUnidad")]
    pub age_unit: AgeUnit,
    #[serde(rename = "estado")]
    pub status: AnimalStatus,
    #[serde(rename = "imagen", default)]
    pub image_url: Option<String>,
}

impl Animal {
    pub fn life_stage(&self) -> LifeStage {
        LifeStage::from_age(self.age_value, self.age_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_are_always_young() {
        assert_eq!(LifeStage::from_age(11, AgeUnit::Months), LifeStage::Young);
        assert_eq!(LifeStage::from_age(30, AgeUnit::Months), LifeStage::Young);
    }

    #[test]
    fn year_buckets() {
        assert_eq!(LifeStage::from_age(1, AgeUnit::Years), LifeStage::Young);
        assert_eq!(LifeStage::from_age(2, AgeUnit::Years), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(8, AgeUnit::Years), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(9, AgeUnit::Years), LifeStage::Senior);
    }
}
