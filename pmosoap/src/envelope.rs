//! Assemblage de l'enveloppe SOAP : `Envelope`, `Header` et `Body`
//!
//! Chaque assembleur ouvre et ferme ses propres balises, dans l'ordre
//! inverse de leur ouverture.

use crate::config::EnvelopeConfig;
use crate::errors::{Result, SoapError};
use crate::tokens::TokenStream;

fn xmlns(namespace: &str) -> Vec<(String, String)> {
    vec![("xmlns".to_string(), namespace.to_string())]
}

/// Nom de l'élément de méthode : `prefix:method` ou `method`
fn method_tag(method: &str, prefix_namespace: Option<&str>) -> String {
    match prefix_namespace.filter(|prefix| !prefix.is_empty()) {
        Some(prefix) => format!("{}:{}", prefix, method),
        None => method.to_string(),
    }
}

impl TokenStream {
    pub fn start_envelope(&mut self, config: &EnvelopeConfig) {
        self.push_start_with(config.tag("Envelope"), config.envelope_attributes());
    }

    pub fn end_envelope(&mut self, config: &EnvelopeConfig) {
        self.push_end(config.tag("Envelope"));
    }

    /// Ouvre `Header`, puis `<name xmlns="namespace">` si les deux sont
    /// renseignés.
    pub fn start_header(&mut self, config: &EnvelopeConfig, name: &str, namespace: &str) {
        self.push_start(config.tag("Header"));
        if name.is_empty() || namespace.is_empty() {
            return;
        }
        self.push_start_with(name, xmlns(namespace));
    }

    /// Ferme ce que [`TokenStream::start_header`] a ouvert avec les mêmes
    /// arguments.
    pub fn end_header(&mut self, config: &EnvelopeConfig, name: &str, namespace: &str) {
        if !name.is_empty() && !namespace.is_empty() {
            self.push_end(name);
        }
        self.push_end(config.tag("Header"));
    }

    /// Ouvre `Body` puis l'élément de méthode.
    ///
    /// Échoue sans rien ajouter si `method` ou `namespace` est vide.
    pub fn start_body(
        &mut self,
        config: &EnvelopeConfig,
        method: &str,
        namespace: &str,
        prefix_namespace: Option<&str>,
    ) -> Result<()> {
        if method.is_empty() || namespace.is_empty() {
            return Err(SoapError::MissingMethodOrNamespace);
        }

        self.push_start(config.tag("Body"));
        match prefix_namespace.filter(|prefix| !prefix.is_empty()) {
            Some(prefix) => self.push_start(format!("{}:{}", prefix, method)),
            None => self.push_start_with(method, xmlns(namespace)),
        }
        Ok(())
    }

    pub fn end_body(&mut self, config: &EnvelopeConfig, method: &str, prefix_namespace: Option<&str>) {
        self.push_end(method_tag(method, prefix_namespace));
        self.push_end(config.tag("Body"));
    }
}
