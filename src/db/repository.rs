// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use chrono::NaiveDate;
use serde_json::Value;

use crate::{common::error::AppError, db::storage::LocalStorage, models::entidade::Entidade};

/// Acesso genérico a uma coleção (um array JSON sob `T::STORAGE_KEY`).
///
/// Leituras nunca falham: JSON corrompido é lido como coleção vazia e registros
/// que não batem com o schema de `T` são ignorados. As escritas trabalham sobre
/// o array cru, então registros que não conseguimos ler continuam gravados.
pub struct Repository<T> {
    storage: Arc<dyn LocalStorage>,
    _entidade: PhantomData<fn() -> T>,
}

// Clone manual: `T` não precisa ser Clone para o repositório ser
impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            _entidade: PhantomData,
        }
    }
}

impl<T: Entidade> Repository<T> {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            _entidade: PhantomData,
        }
    }

    // Lê o array cru. Qualquer coisa que não seja um array JSON vira vazio.
    fn load_raw(&self) -> Vec<Value> {
        let Some(raw) = self.storage.get_item(T::STORAGE_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(itens)) => itens,
            Ok(_) => {
                tracing::warn!("⚠️ {} não contém um array, lendo como vazio", T::STORAGE_KEY);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("⚠️ {} com JSON inválido ({}), lendo como vazio", T::STORAGE_KEY, e);
                Vec::new()
            }
        }
    }

    fn save_raw(&self, itens: &[Value]) -> Result<(), AppError> {
        let json = serde_json::to_string(itens)?;
        self.storage.set_item(T::STORAGE_KEY, &json)
    }

    fn raw_id(valor: &Value) -> Option<&str> {
        valor.get("id").and_then(Value::as_str)
    }

    /// Todos os registros de todas as igrejas, na ordem em que estão gravados.
    pub fn load_all(&self) -> Vec<T> {
        self.load_raw()
            .into_iter()
            .filter_map(|valor| match serde_json::from_value::<T>(valor) {
                Ok(entidade) => Some(entidade),
                Err(e) => {
                    tracing::warn!("⚠️ Registro ignorado em {}: {}", T::STORAGE_KEY, e);
                    None
                }
            })
            .collect()
    }

    /// Só os registros da igreja, já na ordem de exibição de `T`.
    pub fn load_for_tenant(&self, igreja_id: &str, hoje: NaiveDate) -> Vec<T> {
        let mut itens: Vec<T> = self
            .load_all()
            .into_iter()
            .filter(|e| e.igreja_id() == igreja_id)
            .collect();
        itens.sort_by(|a, b| T::ordenar(a, b, hoje));
        itens
    }

    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.load_all().into_iter().find(|e| e.id() == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.load_raw().iter().any(|v| Self::raw_id(v) == Some(id))
    }

    /// Acrescenta ao fim da coleção. O id já deve ter sido gerado.
    pub fn create(&self, entidade: &T) -> Result<(), AppError> {
        let mut itens = self.load_raw();
        itens.push(serde_json::to_value(entidade)?);
        self.save_raw(&itens)?;

        tracing::debug!("Criado {} em {}", entidade.id(), T::STORAGE_KEY);
        Ok(())
    }

    /// Remove o registro. Id inexistente não é erro: nada muda e devolve `false`.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut itens = self.load_raw();
        let antes = itens.len();
        itens.retain(|v| Self::raw_id(v) != Some(id));

        if itens.len() == antes {
            return Ok(false);
        }

        self.save_raw(&itens)?;
        tracing::debug!("Excluído {} de {}", id, T::STORAGE_KEY);
        Ok(true)
    }

    /// Localiza pelo id, aplica `mutator` e regrava. Id inexistente (ou registro
    /// ilegível) é um no-op e devolve `None`.
    ///
    /// Campos gravados que `T` não conhece são preservados.
    pub fn update_field<F>(&self, id: &str, mutator: F) -> Result<Option<T>, AppError>
    where
        F: FnOnce(&mut T),
    {
        let mut itens = self.load_raw();
        let Some(posicao) = itens.iter().position(|v| Self::raw_id(v) == Some(id)) else {
            return Ok(None);
        };

        let mut entidade: T = match serde_json::from_value(itens[posicao].clone()) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("⚠️ Registro {} ilegível em {}: {}", id, T::STORAGE_KEY, e);
                return Ok(None);
            }
        };

        mutator(&mut entidade);

        let atualizado = serde_json::to_value(&entidade)?;
        match (&mut itens[posicao], atualizado) {
            (Value::Object(original), Value::Object(novos)) => {
                for (campo, valor) in novos {
                    original.insert(campo, valor);
                }
            }
            (slot, novo) => *slot = novo,
        }

        self.save_raw(&itens)?;
        Ok(Some(entidade))
    }
}
