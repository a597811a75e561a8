//! Flux de tokens XML
//!
//! Les assembleurs décident de la structure en ajoutant des tokens ; rien
//! n'est écrit avant [`TokenStream::write_to`].

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

use crate::errors::{Result, SoapError};

/// Balise ouvrante avec ses attributs, dans l'ordre d'émission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// Événement XML atomique
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    End(String),
    Text(String),
}

impl Token {
    fn to_event(&self) -> Event<'_> {
        match self {
            Token::Start(tag) => {
                let mut start = BytesStart::new(tag.name.as_str());
                for (name, value) in &tag.attributes {
                    start.push_attribute((name.as_str(), value.as_str()));
                }
                Event::Start(start)
            }
            Token::End(name) => Event::End(BytesEnd::new(name.as_str())),
            Token::Text(text) => Event::Text(BytesText::new(text)),
        }
    }
}

/// Séquence ordonnée de tokens, en ajout seul
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    data: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_start(&mut self, name: impl Into<String>) {
        self.push_start_with(name, Vec::new());
    }

    pub fn push_start_with(&mut self, name: impl Into<String>, attributes: Vec<(String, String)>) {
        self.data.push(Token::Start(StartTag {
            name: name.into(),
            attributes,
        }));
    }

    pub fn push_end(&mut self, name: impl Into<String>) {
        self.data.push(Token::End(name.into()));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.data.push(Token::Text(text.into()));
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<Token> {
        self.data
    }

    /// Rejoue le flux sur une pile : chaque fermeture doit correspondre à
    /// la dernière ouverture, et la pile doit finir vide.
    pub fn is_balanced(&self) -> bool {
        let mut open: Vec<&str> = Vec::new();
        for token in &self.data {
            match token {
                Token::Start(tag) => open.push(&tag.name),
                Token::End(name) => match open.pop() {
                    Some(expected) if expected == name.as_str() => {}
                    _ => return false,
                },
                Token::Text(_) => {}
            }
        }
        open.is_empty()
    }

    /// Émet tous les tokens dans l'ordre puis vide le tampon du writer.
    ///
    /// L'échappement du texte et des attributs est fait par quick-xml. La
    /// première erreur interrompt l'émission ; le writer peut alors contenir
    /// un document partiel.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        for token in &self.data {
            writer
                .write_event(token.to_event())
                .map_err(|e| SoapError::Write(e.to_string()))?;
        }
        writer.get_mut().flush()?;
        trace!(tokens = self.data.len(), "Token stream written");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
