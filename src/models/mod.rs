// Entity records shared by the repository and HTTP layers.
// Field names double as column names and JSON keys.

pub mod campanha;
pub mod doacao;
pub mod enums;
pub mod noticia;
pub mod relatorio;
pub mod usuario;

pub use campanha::Campanha;
pub use doacao::Doacao;
pub use enums::{FormaArrecadacao, StatusArrecadacao, TipoDoacao, TipoRelatorio};
pub use noticia::Noticia;
pub use relatorio::Relatorio;
pub use usuario::Usuario;
