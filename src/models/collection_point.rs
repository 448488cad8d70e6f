use serde::Deserialize;
use serde_json::Value;

use super::location::GeoPoint;

/// A drop-off location for recyclable electronics, as held in memory after
/// validation. The upstream catalog owns these records; we keep a read-only
/// copy per refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPoint {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// Coordinates as the upstream emits them. Values arrive as arbitrary JSON so
/// a single record with a string latitude does not fail the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoordinates {
    #[serde(rename = "_latitude")]
    pub latitude: Option<Value>,
    #[serde(rename = "_longitude")]
    pub longitude: Option<Value>,
}

/// An unvalidated catalog record. Every field is optional; `from_raw` decides
/// what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPointRecord {
    pub id: Option<String>,
    pub nome: Option<String>,
    pub endereco: Option<String>,
    pub imagem: Option<String>,
    pub site: Option<String>,
    pub telefone: Option<String>,
    pub coordenadas: Option<RawCoordinates>,
}

impl CollectionPoint {
    /// Validate a raw catalog record. Records without an id, or with missing,
    /// non-numeric, or out-of-range coordinates, are dropped; the caller
    /// filters them out silently rather than surfacing an error.
    pub fn from_raw(raw: RawPointRecord) -> Option<Self> {
        let id = raw.id?;
        let coords = raw.coordenadas?;
        let latitude = coords.latitude.as_ref().and_then(Value::as_f64)?;
        let longitude = coords.longitude.as_ref().and_then(Value::as_f64)?;
        let location = GeoPoint::try_new(latitude, longitude)?;

        Some(Self {
            id,
            name: raw.nome.unwrap_or_default(),
            address: raw.endereco.unwrap_or_default(),
            location,
            image_url: raw.imagem,
            website: raw.site,
            phone: raw.telefone,
        })
    }
}
