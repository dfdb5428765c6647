//! Serde extraction of a loaded configuration into typed structs
//!
//! The effective table (file variables, then defaults for keys the file does
//! not define) is presented as a map of strings. Numeric targets apply the
//! same shape checks as [`Config::get_int`] and [`Config::get_float`], so a
//! value that `get_int` rejects is rejected here too.

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::text::{looks_like_float, looks_like_integer, strip};
use indexmap::IndexMap;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, Deserialize, DeserializeSeed, Visitor};

impl Config {
    /// Deserializes the effective table into `T`.
    ///
    /// Unlike the accessors this does not touch the error slot, but an
    /// outstanding fatal error is returned as is.
    ///
    /// ```no_run
    /// use serde::Deserialize;
    /// use snapconfig::Config;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    ///     timeout: Option<f64>,
    /// }
    ///
    /// let config = Config::open("server.conf");
    /// let server: Server = config.extract()?;
    /// # Ok::<(), snapconfig::ConfigError>(())
    /// ```
    pub fn extract<'a, T>(&'a self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        if let Some(err) = self.fatal_error() {
            return Err(err.clone());
        }
        T::deserialize(ConfigDeserializer::new(self.effective_variables()))
    }
}

/// Deserializer over a whole table of string pairs
pub struct ConfigDeserializer<'a> {
    entries: IndexMap<&'a str, &'a str>,
}

impl<'a> ConfigDeserializer<'a> {
    pub fn new(entries: IndexMap<&'a str, &'a str>) -> Self {
        Self { entries }
    }
}

impl<'de> de::Deserializer<'de> for ConfigDeserializer<'de> {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(TableMapAccess::new(self.entries))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct TableMapAccess<'a> {
    entries: indexmap::map::IntoIter<&'a str, &'a str>,
    current: Option<(&'a str, &'a str)>,
}

impl<'a> TableMapAccess<'a> {
    fn new(entries: IndexMap<&'a str, &'a str>) -> Self {
        Self {
            entries: entries.into_iter(),
            current: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for TableMapAccess<'de> {
    type Error = ConfigError;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, value)) => {
                self.current = Some((key, value));
                seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.current.take() {
            Some((key, value)) => seed.deserialize(ValueDeserializer { key, value }),
            None => Err(de::Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Deserializer for a single raw value, remembering its key for error reports
struct ValueDeserializer<'a> {
    key: &'a str,
    value: &'a str,
}

impl ValueDeserializer<'_> {
    fn wrong_type(&self, expected: &'static str) -> ConfigError {
        ConfigError::WrongType {
            key: self.key.to_string(),
            expected,
        }
    }

    fn integer<T: std::str::FromStr>(&self) -> Result<T> {
        if !looks_like_integer(self.value) {
            return Err(self.wrong_type("integer"));
        }
        strip(self.value)
            .parse()
            .map_err(|_| self.wrong_type("integer"))
    }

    fn float(&self) -> Result<f64> {
        if !looks_like_float(self.value) && !looks_like_integer(self.value) {
            return Err(self.wrong_type("floating"));
        }
        match strip(self.value).parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(self.wrong_type("floating")),
        }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = ConfigError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match strip(self.value) {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            _ => Err(self.wrong_type("boolean")),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u64(self.integer()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.wrong_type("single character")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if strip(self.value).is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if strip(self.value).is_empty() {
            visitor.visit_unit()
        } else {
            Err(self.wrong_type("empty"))
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(strip(self.value)))
    }

    serde::forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn table<'a>(pairs: &[(&'a str, &'a str)]) -> ConfigDeserializer<'a> {
        ConfigDeserializer::new(pairs.iter().copied().collect())
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        ratio: f64,
        verbose: bool,
        mode: Mode,
        tag: Option<char>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Mode {
        Fast,
        Safe,
    }

    #[test]
    fn test_struct_extraction() {
        let server = Server::deserialize(table(&[
            ("host", "localhost"),
            ("port", " 8080 "),
            ("ratio", "0.75"),
            ("verbose", "true"),
            ("mode", "safe"),
        ]))
        .unwrap();

        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 8080,
                ratio: 0.75,
                verbose: true,
                mode: Mode::Safe,
                tag: None,
            }
        );
    }

    #[test]
    fn test_integer_is_accepted_as_float() {
        #[derive(Deserialize)]
        struct Ratio {
            ratio: f32,
        }
        let ratio = Ratio::deserialize(table(&[("ratio", "2")])).unwrap();
        assert_eq!(ratio.ratio, 2.0);
    }

    #[test]
    fn test_wrong_type_names_key() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Port {
            port: u16,
        }
        let err = Port::deserialize(table(&[("port", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongType {
                key: "port".to_string(),
                expected: "integer"
            }
        );
    }

    #[test]
    fn test_out_of_range_is_reported() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Port {
            port: u8,
        }
        let err = Port::deserialize(table(&[("port", "300")])).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize { .. }));
    }

    #[test]
    fn test_missing_field() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            present: String,
            absent: String,
        }
        let err = Needs::deserialize(table(&[("present", "x")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Deserialize {
                message: "missing field `absent`".to_string()
            }
        );
    }

    #[test]
    fn test_empty_value_is_none() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Optional {
            port: Option<u16>,
            name: Option<String>,
            ratio: Option<f64>,
        }
        let optional = Optional::deserialize(table(&[
            ("port", ""),
            ("name", "   "),
            ("ratio", "0.5"),
        ]))
        .unwrap();
        assert_eq!(
            optional,
            Optional {
                port: None,
                name: None,
                ratio: Some(0.5),
            }
        );
    }

    #[test]
    fn test_borrowed_strings() {
        #[derive(Deserialize)]
        struct Borrowed<'a> {
            name: &'a str,
        }
        let borrowed = Borrowed::deserialize(table(&[("name", " raw ")])).unwrap();
        assert_eq!(borrowed.name, " raw ");
    }
}
