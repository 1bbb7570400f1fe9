// src/db/storage.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::common::error::AppError;

/// O armazenamento chave-valor local: cada chave guarda uma string (em geral
/// um JSON). Mesmo contrato do `localStorage` do navegador.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, chave: &str) -> Option<String>;
    fn set_item(&self, chave: &str, valor: &str) -> Result<(), AppError>;
    fn remove_item(&self, chave: &str) -> Result<(), AppError>;
}

// Um lock envenenado só significa que outra thread entrou em pânico no meio
// de uma escrita; o mapa continua utilizável.
fn ler<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn escrever<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

// =========================================================================
//  MEMÓRIA (testes e CF_ARMAZENAMENTO=:memoria:)
// =========================================================================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    itens: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, chave: &str) -> Option<String> {
        ler(&self.itens).get(chave).cloned()
    }

    fn set_item(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        escrever(&self.itens).insert(chave.to_string(), valor.to_string());
        Ok(())
    }

    fn remove_item(&self, chave: &str) -> Result<(), AppError> {
        escrever(&self.itens).remove(chave);
        Ok(())
    }
}

// =========================================================================
//  ARQUIVO (o app em execução)
// =========================================================================

/// Guarda o mapa inteiro como um objeto JSON em um único arquivo.
///
/// Cada escrita regrava o arquivo todo (via arquivo temporário + rename), assim
/// uma queda no meio da gravação nunca deixa o arquivo pela metade.
#[derive(Debug)]
pub struct FileStorage {
    caminho: PathBuf,
    itens: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    pub fn open(caminho: impl AsRef<Path>) -> Result<Self, AppError> {
        let caminho = caminho.as_ref().to_path_buf();

        if let Some(dir) = caminho.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let itens = match fs::read_to_string(&caminho) {
            Ok(conteudo) => match serde_json::from_str::<HashMap<String, String>>(&conteudo) {
                Ok(mapa) => mapa,
                Err(e) => {
                    // Mesmo comportamento tolerante das coleções: arquivo corrompido vira vazio
                    tracing::warn!(
                        "⚠️ Arquivo de armazenamento {} ilegível ({}), começando vazio",
                        caminho.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "📂 Armazenamento local em {} ({} chaves)",
            caminho.display(),
            itens.len()
        );

        Ok(Self {
            caminho,
            itens: RwLock::new(itens),
        })
    }

    fn persistir(&self, itens: &HashMap<String, String>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(itens)?;
        let temporario = self.caminho.with_extension("json.tmp");
        fs::write(&temporario, json)?;
        fs::rename(&temporario, &self.caminho)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, chave: &str) -> Option<String> {
        ler(&self.itens).get(chave).cloned()
    }

    fn set_item(&self, chave: &str, valor: &str) -> Result<(), AppError> {
        let mut itens = escrever(&self.itens);
        itens.insert(chave.to_string(), valor.to_string());
        self.persistir(&itens)
    }

    fn remove_item(&self, chave: &str) -> Result<(), AppError> {
        let mut itens = escrever(&self.itens);
        if itens.remove(chave).is_some() {
            self.persistir(&itens)?;
        }
        Ok(())
    }
}
