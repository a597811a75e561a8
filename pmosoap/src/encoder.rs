//! Encodage récursif d'une [`SoapValue`] en tokens

use crate::tokens::TokenStream;
use crate::value::SoapValue;

impl TokenStream {
    /// Déplie récursivement `value` à la fin du flux.
    ///
    /// Ne peut pas échouer : le vocabulaire de [`SoapValue`] est fermé et
    /// chaque forme a une règle d'encodage.
    pub fn encode_value(&mut self, value: &SoapValue) {
        match value {
            SoapValue::Namespaced(param) => {
                self.encode_element(&param.qualified_name(), &param.value);
            }
            SoapValue::Map(entries) => {
                for (key, entry) in entries {
                    self.encode_element(key, entry);
                }
            }
            SoapValue::Seq(items) => {
                for item in items {
                    self.encode_value(item);
                }
            }
            SoapValue::Pair(label, content) => self.encode_element(label, content),
            SoapValue::Text(text) => self.push_text(text.as_str()),
            SoapValue::Int(number) => self.push_text(number.to_string()),
        }
    }

    fn encode_element(&mut self, name: &str, content: &SoapValue) {
        self.push_start(name);
        self.encode_value(content);
        self.push_end(name);
    }
}
