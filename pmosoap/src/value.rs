//! Valeurs dynamiques encodables dans une enveloppe SOAP
//!
//! [`SoapValue`] est un vocabulaire fermé : toute forme qui n'y figure pas
//! (flottants, booléens, null...) est refusée à la conversion, jamais
//! silencieusement ignorée à l'encodage.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::errors::{Result, SoapError};

/// Arbre de paramètres d'une requête SOAP
///
/// # Ordre des éléments
///
/// Les entrées d'une [`SoapValue::Map`] sont émises dans l'ordre de leurs
/// clés. Un appelant qui a besoin d'un ordre de document précis doit
/// utiliser des [`SoapValue::Pair`], éventuellement regroupées dans une
/// [`SoapValue::Seq`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapValue {
    /// Un élément par clé, enveloppant la valeur associée
    Map(BTreeMap<String, SoapValue>),

    /// Un élément nommé explicitement (position 0) autour d'un contenu (position 1)
    Pair(String, Box<SoapValue>),

    /// Des éléments frères, sans élément englobant
    Seq(Vec<SoapValue>),

    /// Un élément `namespace:name` autour d'un contenu
    Namespaced(NamespaceParam),

    /// Données textuelles, sans imbrication
    Text(String),

    /// Entier, rendu en base 10
    Int(i64),
}

/// Élément qualifié par un préfixe de namespace explicite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceParam {
    /// Préfixe (ex: "ns1")
    pub namespace: String,

    /// Nom local (ex: "Credentials")
    pub name: String,

    /// Contenu de l'élément
    pub value: Box<SoapValue>,
}

impl NamespaceParam {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<SoapValue>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: Box::new(value.into()),
        }
    }

    /// Nom de balise pré-qualifié, sans liaison d'URI
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }
}

impl SoapValue {
    /// Construit une paire ordonnée `(name, value)`
    pub fn pair(name: impl Into<String>, value: impl Into<SoapValue>) -> Self {
        SoapValue::Pair(name.into(), Box::new(value.into()))
    }

    /// Construit une map à partir d'une liste d'entrées
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SoapValue>,
    {
        SoapValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Vrai pour une map ou une séquence sans entrée
    pub fn is_empty(&self) -> bool {
        match self {
            SoapValue::Map(entries) => entries.is_empty(),
            SoapValue::Seq(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl Default for SoapValue {
    fn default() -> Self {
        SoapValue::Map(BTreeMap::new())
    }
}

impl From<&str> for SoapValue {
    fn from(value: &str) -> Self {
        SoapValue::Text(value.to_string())
    }
}

impl From<String> for SoapValue {
    fn from(value: String) -> Self {
        SoapValue::Text(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SoapValue {
                fn from(value: $ty) -> Self {
                    SoapValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<NamespaceParam> for SoapValue {
    fn from(value: NamespaceParam) -> Self {
        SoapValue::Namespaced(value)
    }
}

impl<T: Into<SoapValue>> From<Vec<T>> for SoapValue {
    fn from(items: Vec<T>) -> Self {
        SoapValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<SoapValue>> From<(K, V)> for SoapValue {
    fn from((name, value): (K, V)) -> Self {
        SoapValue::pair(name, value)
    }
}

impl<K: Into<String>, V: Into<SoapValue>> From<BTreeMap<K, V>> for SoapValue {
    fn from(entries: BTreeMap<K, V>) -> Self {
        SoapValue::map(entries)
    }
}

impl<K: Into<String>, V: Into<SoapValue>> From<HashMap<K, V>> for SoapValue {
    fn from(entries: HashMap<K, V>) -> Self {
        SoapValue::map(entries)
    }
}

/// Conversion depuis un arbre JSON
///
/// Les objets deviennent des maps, les tableaux des séquences, les chaînes
/// du texte et les nombres entiers des [`SoapValue::Int`]. Les flottants,
/// booléens et `null` sont refusés.
impl TryFrom<Value> for SoapValue {
    type Error = SoapError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(SoapValue::Text(text)),
            Value::Number(number) if number.is_f64() => Err(SoapError::UnsupportedValue(
                format!("{} is not a whole number", number),
            )),
            Value::Number(number) => number.as_i64().map(SoapValue::Int).ok_or_else(|| {
                SoapError::UnsupportedValue(format!("{} is out of i64 range", number))
            }),
            Value::Array(items) => items
                .into_iter()
                .map(SoapValue::try_from)
                .collect::<Result<Vec<_>>>()
                .map(SoapValue::Seq),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, entry)| SoapValue::try_from(entry).map(|entry| (key, entry)))
                .collect::<Result<BTreeMap<_, _>>>()
                .map(SoapValue::Map),
            Value::Bool(flag) => Err(SoapError::UnsupportedValue(format!("boolean {}", flag))),
            Value::Null => Err(SoapError::unsupported_value("null")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_conversions() {
        assert_eq!(SoapValue::from("x"), SoapValue::Text("x".to_string()));
        assert_eq!(SoapValue::from(7u8), SoapValue::Int(7));
        assert_eq!(
            SoapValue::from(("Item", "a")),
            SoapValue::Pair("Item".to_string(), Box::new(SoapValue::Text("a".to_string())))
        );
        assert_eq!(
            SoapValue::from(vec![1, 2]),
            SoapValue::Seq(vec![SoapValue::Int(1), SoapValue::Int(2)])
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(SoapValue::default().is_empty());
        assert!(SoapValue::Seq(Vec::new()).is_empty());
        assert!(!SoapValue::from("").is_empty());
        assert!(!SoapValue::map([("A", "x")]).is_empty());
    }

    #[test]
    fn test_qualified_name() {
        let param = NamespaceParam::new("ns", "Foo", "bar");
        assert_eq!(param.qualified_name(), "ns:Foo");
    }

    #[test]
    fn test_from_json() {
        let value = SoapValue::try_from(json!({
            "Name": "Alice",
            "Age": 42,
            "Tags": ["a", "b"]
        }))
        .unwrap();

        let expected = SoapValue::map([
            ("Name", SoapValue::from("Alice")),
            ("Age", SoapValue::from(42)),
            ("Tags", SoapValue::from(vec!["a", "b"])),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_from_json_rejects_unsupported_shapes() {
        for value in [json!(1.5), json!(true), json!(null), json!({"A": [1, false]})] {
            let err = SoapValue::try_from(value).unwrap_err();
            assert!(matches!(err, SoapError::UnsupportedValue(_)));
        }
    }

    #[test]
    fn test_from_json_rejects_overflowing_integer() {
        let err = SoapValue::try_from(json!(u64::MAX)).unwrap_err();
        assert!(err.to_string().contains("out of i64 range"));

        let err = SoapValue::try_from(json!(2.5)).unwrap_err();
        assert!(err.to_string().contains("not a whole number"));
    }
}
