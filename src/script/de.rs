//! Lenient deserializers for fields the upstream pipeline fills inconsistently.

use serde::{Deserialize, Deserializer};

/// `null` deserializes as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a single value, a list, or `null` (empty list).
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<Repr<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Repr::Many(v)) => v,
        Some(Repr::One(v)) => vec![v],
    })
}

/// Accept a number, a numeric string or `null`.
///
/// `null` maps to `0.0`; unparsable strings map to `NaN` so consumers can treat them as malformed.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        None => 0.0,
        Some(Repr::Num(v)) => v,
        Some(Repr::Text(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
    })
}

/// Optional variant of [`lenient_f64`]: `null`/missing stays `None`.
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        None => None,
        Some(Repr::Num(v)) => Some(v),
        Some(Repr::Text(s)) => s.trim().parse::<f64>().ok(),
    })
}

/// Scene ids arrive as integers, integral floats or digit strings.
pub(crate) fn lenient_scene_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_scene_id(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("scene number must be a non-negative integer"))
}

/// Optional variant of [`lenient_scene_id`]; malformed values become `None`.
pub(crate) fn lenient_opt_scene_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        None => None,
        Some(Repr::Int(v)) => u32::try_from(v).ok(),
        Some(Repr::Float(v)) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => {
            u32::try_from(v as u64).ok()
        }
        Some(Repr::Float(_)) => None,
        Some(Repr::Text(s)) => s.trim().parse::<u32>().ok(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/script/de.rs"]
mod tests;
