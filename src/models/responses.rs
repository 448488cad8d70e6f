use serde::{Deserialize, Serialize};

use super::collection_point::CollectionPoint;

/// A collection point as the mobile client expects it on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointPayload {
    pub id: String,
    pub nome: String,
    pub endereco: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub coordenadas: CoordinatesPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatesPayload {
    #[serde(rename = "_latitude")]
    pub latitude: f64,
    #[serde(rename = "_longitude")]
    pub longitude: f64,
}

impl From<&CollectionPoint> for PointPayload {
    fn from(point: &CollectionPoint) -> Self {
        Self {
            id: point.id.clone(),
            nome: point.name.clone(),
            endereco: point.address.clone(),
            imagem: point.image_url.clone(),
            site: point.website.clone(),
            telefone: point.phone.clone(),
            coordenadas: CoordinatesPayload {
                latitude: point.location.latitude,
                longitude: point.location.longitude,
            },
        }
    }
}

/// Response for `GET /locais/distancia_local/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distancia: f64,
}

/// Response for `GET /locais/local_mais_proximo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestPointResponse {
    pub id_local: String,
    pub nome_local: String,
}

/// One row of `GET /locais/distancia_locais`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDistance {
    pub id: String,
    pub distancia: f64,
}
