//! # pmosoap - Encodage d'enveloppes SOAP 1.1
//!
//! Ce crate transforme un arbre de paramètres dynamiques en enveloppe SOAP
//! (`Envelope`, `Header` optionnel, `Body`) écrite avec `quick-xml`.
//!
//! ## Fonctionnalités
//!
//! - ✅ Encodage récursif des maps, paires ordonnées, séquences, éléments
//!   qualifiés, textes et entiers
//! - ✅ Header qualifié par le namespace cible des définitions
//! - ✅ Préfixe et attributs d'enveloppe configurables (YAML ou global)
//! - ✅ Flux de tokens équilibré par construction
//!
//! ## Architecture
//!
//! - [`SoapValue`] : arbre de paramètres
//! - [`TokenStream`] : flux de tokens XML, rempli par les assembleurs
//! - [`EnvelopeConfig`] : préfixe et attributs de l'enveloppe
//! - [`EnvelopeEncoder`] : orchestration d'une passe d'encodage
//!
//! ## Example
//!
//! ```
//! use pmosoap::{Client, Definitions, EnvelopeConfig, EnvelopeEncoder, Process, Request, SoapValue};
//!
//! let process = Process::new(
//!     Client::new(Definitions::with_target_namespace("urn:shop")),
//!     Request::new("GetPrice", SoapValue::map([("Item", "apple")])),
//! );
//!
//! let xml = EnvelopeEncoder::new(EnvelopeConfig::default())
//!     .to_string(&process)
//!     .unwrap();
//! assert!(xml.contains("<GetPrice xmlns=\"urn:shop\"><Item>apple</Item></GetPrice>"));
//! ```

mod config;
mod definitions;
mod encoder;
mod envelope;
mod errors;
mod process;
mod tokens;
mod value;

pub use config::{
    DEFAULT_PREFIX, EnvelopeConfig, SOAP_ENVELOPE_NAMESPACE, XSD_NAMESPACE, XSI_NAMESPACE,
    configure_envelope, global_envelope_config, reset_envelope_config,
};
pub use definitions::{Definitions, WsdlTypes, XsdSchema};
pub use errors::{Result, SoapError};
pub use process::{Client, EnvelopeEncoder, Process, Request};
pub use tokens::{StartTag, Token, TokenStream};
pub use value::{NamespaceParam, SoapValue};
