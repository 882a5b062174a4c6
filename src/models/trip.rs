use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// What the traveller plans to spend the trip doing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    #[strum(to_string = "Relaxing")]
    Relax,
    #[strum(to_string = "Food tour")]
    Food,
    #[strum(to_string = "Outdoor activities")]
    Activity,
    #[strum(to_string = "Shopping")]
    Shopping,
    #[strum(to_string = "Nature viewing")]
    Nature,
    #[strum(to_string = "City exploring")]
    City,
    #[strum(to_string = "Partying")]
    Party,
    #[strum(to_string = "Culture & arts")]
    Culture,
}

/// Preferred music genre.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[strum(to_string = "K-Pop")]
    Kpop,
    #[strum(to_string = "Pop")]
    Pop,
    #[strum(to_string = "Hip-hop/Rap")]
    Hiphop,
    #[strum(to_string = "R&B/Soul")]
    Rnb,
    #[strum(to_string = "Rock/Metal")]
    Rock,
    #[strum(to_string = "Jazz")]
    Jazz,
    #[strum(to_string = "Classical")]
    Classic,
    #[strum(to_string = "Lo-fi")]
    Lofi,
}

/// A trip description submitted for playlist generation.
///
/// Absent, `null` and blank fields all deserialize to their empty value so
/// that an unfilled form surfaces as a validation failure instead of a
/// deserialization error. The end date is not checked against the start date.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[garde(custom(non_blank))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,

    #[garde(required)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,

    #[garde(required)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,

    #[garde(length(min = 1))]
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,

    #[garde(skip)]
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Date inputs post `""` when left empty.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[allow(clippy::ptr_arg)]
fn non_blank(value: &String, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}
