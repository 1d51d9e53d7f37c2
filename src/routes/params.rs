use serde::Deserializer;

/// Reads an optional id from a query string or JSON body. Blank values
/// from unselected dropdowns count as absent.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct OptionalIdVisitor;

    impl<'de> Visitor<'de> for OptionalIdVisitor {
        type Value = Option<i32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer id, a numeric string or nothing")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse::<i32>()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(OptionalIdVisitor)
        }
    }

    deserializer.deserialize_any(OptionalIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "optional_id")]
        week: Option<i32>,
    }

    #[test]
    fn blank_query_value_is_none() {
        let filter: Filter = from_query("week=");
        assert_eq!(filter.week, None);
        let filter: Filter = from_query("week=4");
        assert_eq!(filter.week, Some(4));
        let filter: Filter = from_query("");
        assert_eq!(filter.week, None);
    }

    #[test]
    fn json_numbers_and_nulls_are_accepted() {
        let filter: Filter = serde_json::from_str(r#"{"week": 2}"#).unwrap();
        assert_eq!(filter.week, Some(2));
        let filter: Filter = serde_json::from_str(r#"{"week": null}"#).unwrap();
        assert_eq!(filter.week, None);
        let filter: Filter = serde_json::from_str(r#"{"week": "7"}"#).unwrap();
        assert_eq!(filter.week, Some(7));
        assert!(serde_json::from_str::<Filter>(r#"{"week": "abc"}"#).is_err());
    }

    fn from_query(query: &str) -> Filter {
        let uri: http::Uri = format!("/teacher/dashboard/?{}", query).parse().unwrap();
        axum::extract::Query::<Filter>::try_from_uri(&uri).unwrap().0
    }
}
