//! Single-shot position lookup.
//!
//! A browser shares its position by sending `lat`/`lng`; when it does not, the
//! server can optionally estimate one from the peer address through an
//! ip-api style endpoint. Each call makes at most one request and never retries.

use log::{debug, warn};
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::models::coordinate::Coordinate;
use crate::models::validation::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable(String),
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "Location permission denied"),
            GeolocationError::PositionUnavailable(reason) => {
                write!(f, "Position unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for GeolocationError {}

#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Coordinates the client chose to share with the request.
#[derive(Debug, Clone, Default)]
pub struct ReportedLocation {
    coordinate: Option<Coordinate>,
}

impl ReportedLocation {
    pub fn from_query(lat: Option<f64>, lng: Option<f64>) -> Result<Self, ValidationError> {
        let coordinate = match (lat, lng) {
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                if !coordinate.is_valid() {
                    return Err(ValidationError::new("coordinates", "out of range"));
                }
                Some(coordinate)
            }
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    "coordinates",
                    "lat and lng must be sent together",
                ))
            }
        };
        Ok(Self { coordinate })
    }
}

impl LocationProvider for ReportedLocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.coordinate.ok_or(GeolocationError::PermissionDenied)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

fn coordinate_from_response(response: IpApiResponse) -> Result<Coordinate, GeolocationError> {
    if response.status.as_deref() == Some("fail") {
        return Err(GeolocationError::PositionUnavailable(
            response.message.unwrap_or_else(|| "lookup failed".to_string()),
        ));
    }
    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) if Coordinate::new(lat, lon).is_valid() => {
            Ok(Coordinate::new(lat, lon))
        }
        _ => Err(GeolocationError::PositionUnavailable(
            "lookup returned no usable coordinates".to_string(),
        )),
    }
}

fn is_routable_v4(v4: &Ipv4Addr) -> bool {
    !(v4.is_private()
        || v4.is_loopback()
        || v4.is_link_local()
        || v4.is_unspecified()
        || v4.is_broadcast())
}

fn is_routable(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_routable_v4(v4),
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_routable_v4(&v4);
            }
            let first = v6.segments()[0];
            // fc00::/7 is unique local, fe80::/10 is link local
            !(v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    }
}

pub struct IpLocationProvider {
    http_client: reqwest::Client,
    endpoint: String,
}

impl IpLocationProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Binds the provider to one peer address.
    pub fn for_peer(&self, ip: Option<IpAddr>) -> IpLookup<'_> {
        IpLookup { provider: self, ip }
    }

    async fn locate(&self, ip: IpAddr) -> Result<Coordinate, GeolocationError> {
        let url = format!("{}/{}", self.endpoint, ip);
        debug!("Looking up position for {}", ip);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!("IP geolocation request failed: {}", e);
                GeolocationError::PositionUnavailable(e.to_string())
            })?;

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))?;

        coordinate_from_response(body)
    }
}

pub struct IpLookup<'a> {
    provider: &'a IpLocationProvider,
    ip: Option<IpAddr>,
}

impl LocationProvider for IpLookup<'_> {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        match self.ip {
            Some(ip) if is_routable(&ip) => self.provider.locate(ip).await,
            Some(ip) => Err(GeolocationError::PositionUnavailable(format!(
                "{} is not a public address",
                ip
            ))),
            None => Err(GeolocationError::PositionUnavailable(
                "peer address unknown".to_string(),
            )),
        }
    }
}

/// Asks `primary` first and, only when the client declined to share a position, `fallback`.
pub async fn locate_observer<P, F>(
    primary: &P,
    fallback: Option<&F>,
) -> Result<Coordinate, GeolocationError>
where
    P: LocationProvider,
    F: LocationProvider,
{
    match primary.current_position().await {
        Err(GeolocationError::PermissionDenied) => match fallback {
            Some(provider) => provider.current_position().await,
            None => Err(GeolocationError::PermissionDenied),
        },
        result => result,
    }
}
