pub mod sessao;

pub use sessao::{PapelDef, PapelIgreja, PapelMembro, SessaoAtiva};
