use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the query pipeline. Every variant is terminal for the
/// current action: the client catches it once and renders `Error: <message>`.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The place-name input was empty after trimming. Raised before any
    /// network call.
    #[error("Por favor, introduce una localidad válida.")]
    EmptyInput,

    /// The geocoder returned zero candidates for the query.
    #[error("No se encontró la localidad: {query}")]
    NoMatch { query: String },

    /// The HTTP call failed, or the endpoint answered with a non-success
    /// status.
    #[error("Error en la solicitud de {service}: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// The endpoint answered 2xx but the body did not match the expected
    /// schema.
    #[error("Respuesta inesperada de {service}: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },

    /// A keyed provider was selected but no API key is configured for it.
    #[error(
        "Falta la clave de API para '{provider}'. Ejecuta `eltiempo configure {provider}` primero."
    )]
    MissingApiKey { provider: &'static str },
}

impl QueryError {
    pub(crate) fn send(service: &'static str, err: reqwest::Error) -> Self {
        Self::Transport {
            service,
            message: err.to_string(),
        }
    }

    pub(crate) fn status(service: &'static str, status: StatusCode, body: &str) -> Self {
        Self::Transport {
            service,
            message: format!("estado {}: {}", status, truncate_body(body)),
        }
    }

    pub(crate) fn parse(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            service,
            message: err.to_string(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
