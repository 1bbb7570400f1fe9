pub mod comunicados;
pub mod crud;
pub mod entrada;
pub mod eventos;
pub mod fieis;
pub mod layout;
pub mod lista;
pub mod membros;
pub mod pagamentos;
pub mod painel;
pub mod pedidos;

pub use crud::{renderizar_pagina, VisaoCrud};
pub use lista::{EstadoVazio, ItemLista, ListRenderer};
