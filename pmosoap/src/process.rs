//! Encoding pass of one outbound SOAP call

use std::io::Write;

use quick_xml::Writer;
use tracing::debug;

use crate::config::{EnvelopeConfig, global_envelope_config};
use crate::definitions::Definitions;
use crate::errors::{Result, SoapError};
use crate::tokens::TokenStream;
use crate::value::SoapValue;

/// Client side of a call: service definitions and header parameters
#[derive(Debug, Clone, Default)]
pub struct Client {
    pub definitions: Option<Definitions>,
    pub header_params: SoapValue,
    /// Element wrapping the header parameters, e.g. `AuthHeader`
    pub header_name: String,
}

impl Client {
    pub fn new(definitions: Definitions) -> Self {
        Self {
            definitions: Some(definitions),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, params: impl Into<SoapValue>) -> Self {
        self.header_name = name.into();
        self.header_params = params.into();
        self
    }
}

/// Operation invoked by a call
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: String,
    /// Namespace of the method element. Falls back to the definitions'
    /// target namespace when empty; when set, a body can be built even if
    /// the definitions declare no schema (the header keeps using the
    /// definitions' namespace).
    pub namespace: String,
    /// Prefix qualifying the method element (`prefix:method`) instead of
    /// an `xmlns` declaration.
    pub prefix_namespace: Option<String>,
    pub params: SoapValue,
}

impl Request {
    pub fn new(method: impl Into<String>, params: impl Into<SoapValue>) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_prefix_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_namespace = Some(prefix.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Process {
    pub client: Client,
    pub request: Request,
}

impl Process {
    pub fn new(client: Client, request: Request) -> Self {
        Self { client, request }
    }

    /// Encodes with the process-wide envelope configuration
    pub fn to_xml(&self) -> Result<String> {
        EnvelopeEncoder::from_global().to_string(self)
    }
}

/// Builds SOAP envelopes with a fixed [`EnvelopeConfig`]
///
/// The configuration is captured at construction, so later calls to
/// [`crate::configure_envelope`] never affect an encoder already built.
#[derive(Debug, Clone)]
pub struct EnvelopeEncoder {
    config: EnvelopeConfig,
}

impl Default for EnvelopeEncoder {
    fn default() -> Self {
        Self::from_global()
    }
}

impl EnvelopeEncoder {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self { config }
    }

    /// Encoder using a snapshot of the process-wide configuration
    pub fn from_global() -> Self {
        Self::new(global_envelope_config())
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Builds the complete token stream of `process`.
    ///
    /// `Envelope`, then `Header` when header parameters are not empty,
    /// then `Body` wrapping the method element.
    pub fn tokens(&self, process: &Process) -> Result<TokenStream> {
        let client = &process.client;
        let request = &process.request;

        let definitions = client
            .definitions
            .as_ref()
            .ok_or(SoapError::MissingDefinitions)?;
        let target_namespace = definitions.target_namespace();
        let body_namespace = if request.namespace.is_empty() {
            target_namespace
        } else {
            request.namespace.as_str()
        };

        let mut tokens = TokenStream::new();
        tokens.start_envelope(&self.config);

        if !client.header_params.is_empty() {
            tokens.start_header(&self.config, &client.header_name, target_namespace);
            tokens.encode_value(&client.header_params);
            tokens.end_header(&self.config, &client.header_name, target_namespace);
        }

        let prefix_namespace = request.prefix_namespace.as_deref();
        tokens.start_body(&self.config, &request.method, body_namespace, prefix_namespace)?;
        tokens.encode_value(&request.params);
        tokens.end_body(&self.config, &request.method, prefix_namespace);

        tokens.end_envelope(&self.config);

        debug!(
            method = %request.method,
            namespace = %body_namespace,
            tokens = tokens.len(),
            "SOAP envelope assembled"
        );
        Ok(tokens)
    }

    /// Builds the envelope, then emits it through `writer` and flushes.
    ///
    /// Nothing is written if building fails.
    pub fn write<W: Write>(&self, process: &Process, writer: &mut Writer<W>) -> Result<()> {
        let tokens = self.tokens(process)?;
        tokens.write_to(writer)
    }

    pub fn to_bytes(&self, process: &Process) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        self.write(process, &mut writer)?;
        Ok(writer.into_inner())
    }

    pub fn to_string(&self, process: &Process) -> Result<String> {
        utf8(self.to_bytes(process)?)
    }

    /// Same as [`EnvelopeEncoder::to_string`], indented with `indent` spaces
    pub fn to_string_pretty(&self, process: &Process, indent: usize) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
        self.write(process, &mut writer)?;
        utf8(writer.into_inner())
    }
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| SoapError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;

    fn shop_process() -> Process {
        Process::new(
            Client::new(Definitions::with_target_namespace("urn:shop")),
            Request::new("GetPrice", SoapValue::map([("Item", "apple")])),
        )
    }

    fn encoder() -> EnvelopeEncoder {
        EnvelopeEncoder::new(EnvelopeConfig::default())
    }

    #[test]
    fn test_missing_definitions() {
        let mut process = shop_process();
        process.client.definitions = None;

        let err = encoder().tokens(&process).unwrap_err();
        assert!(matches!(err, SoapError::MissingDefinitions));
    }

    #[test]
    fn test_missing_namespace() {
        let mut process = shop_process();
        process.client.definitions = Some(Definitions::default());

        let err = encoder().tokens(&process).unwrap_err();
        assert!(matches!(err, SoapError::MissingMethodOrNamespace));
    }

    #[test]
    fn test_missing_method_writes_nothing() {
        let mut process = shop_process();
        process.request.method.clear();

        let mut writer = Writer::new(Vec::new());
        let err = encoder().write(&process, &mut writer).unwrap_err();
        assert!(matches!(err, SoapError::MissingMethodOrNamespace));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_request_namespace_overrides_definitions() {
        let process = Process {
            request: shop_process().request.with_namespace("urn:other"),
            ..shop_process()
        };

        let xml = encoder().to_string(&process).unwrap();
        assert!(xml.contains("<GetPrice xmlns=\"urn:other\">"));
    }

    #[test]
    fn test_request_namespace_without_definitions_namespace() {
        let mut process = shop_process();
        process.client.definitions = Some(Definitions::default());
        process.request.namespace = "urn:explicit".to_string();

        let xml = encoder().to_string(&process).unwrap();
        assert!(xml.contains("<GetPrice xmlns=\"urn:explicit\">"));
        assert!(!xml.contains("Header"));
    }

    #[test]
    fn test_header_omitted_without_params() {
        let tokens = encoder().tokens(&shop_process()).unwrap();
        assert!(
            !tokens
                .iter()
                .any(|token| matches!(token, Token::Start(tag) if tag.name == "soap:Header"))
        );
    }

    #[test]
    fn test_header_uses_definitions_namespace() {
        let process = Process {
            client: shop_process()
                .client
                .with_header("AuthHeader", SoapValue::map([("Token", "abc")])),
            ..shop_process()
        };

        let xml = encoder().to_string(&process).unwrap();
        assert!(xml.contains(
            "<soap:Header><AuthHeader xmlns=\"urn:shop\"><Token>abc</Token></AuthHeader></soap:Header>"
        ));
    }

    #[test]
    fn test_to_string_layout() {
        let xml = encoder().to_string(&shop_process()).unwrap();
        assert_eq!(
            xml,
            concat!(
                "<soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
                "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" ",
                "xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">",
                "<soap:Body><GetPrice xmlns=\"urn:shop\"><Item>apple</Item></GetPrice></soap:Body>",
                "</soap:Envelope>"
            )
        );
    }

    #[test]
    fn test_to_string_pretty_is_indented() {
        let xml = encoder().to_string_pretty(&shop_process(), 2).unwrap();
        assert!(xml.contains("\n  <soap:Body>"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let process = Process {
            client: shop_process()
                .client
                .with_header("AuthHeader", SoapValue::map([("User", "u"), ("Pass", "p")])),
            ..shop_process()
        };

        let encoder = encoder();
        assert_eq!(
            encoder.tokens(&process).unwrap(),
            encoder.tokens(&process).unwrap()
        );
        assert_eq!(
            encoder.to_bytes(&process).unwrap(),
            encoder.to_bytes(&process).unwrap()
        );
    }
}
