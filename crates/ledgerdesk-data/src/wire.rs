//! # Wire Records
//!
//! The JSON shapes the back end serves, field for field. Every numeric
//! field goes through [`WireNumber`], every id through [`WireId`], and
//! every label through the label parsers in [`crate::coerce`].
//!
//! Conversion into core records is done with `TryFrom`, which only
//! checks shape (numbers parse, labels are known, dates are ISO).
//! Business rules are checked afterwards by the data source.

use ledgerdesk_core::types::{
    Accountant, ActiveStatus, Client, EntryStatus, Invoice, InvoiceItem, LedgerEntry, Product, Tax,
};
use serde::Deserialize;

use crate::coerce::{self, WireId, WireNumber};
use crate::error::{DataError, DataResult};

fn text(value: Option<String>) -> String {
    coerce::optional_text(value).unwrap_or_default()
}

// =============================================================================
// Product (produtos)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireProduct {
    pub id: Option<WireId>,
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<WireNumber>,
    pub preco_custo: Option<WireNumber>,
    pub quantidade: Option<WireNumber>,
    pub quantidade_minima: Option<WireNumber>,
    pub categoria: Option<String>,
    pub imposto_id: Option<WireId>,
    pub codigo_barras: Option<WireId>,
    pub fornecedor: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<WireProduct> for Product {
    type Error = DataError;

    fn try_from(wire: WireProduct) -> DataResult<Self> {
        let status = match coerce::optional_text(wire.status) {
            Some(label) => coerce::active_status("status", &label)?,
            None => ActiveStatus::Active,
        };

        Ok(Product {
            id: coerce::required_id("id", wire.id)?,
            name: text(wire.nome),
            description: text(wire.descricao),
            sell_price: coerce::amount("preco", wire.preco.as_ref())?,
            cost_price: coerce::optional_amount("preco_custo", wire.preco_custo.as_ref())?,
            quantity_on_hand: coerce::quantity("quantidade", wire.quantidade.as_ref(), 0)?,
            min_quantity: coerce::quantity(
                "quantidade_minima",
                wire.quantidade_minima.as_ref(),
                1,
            )?,
            category: text(wire.categoria),
            tax_id: coerce::optional_id(wire.imposto_id),
            barcode: coerce::optional_id(wire.codigo_barras),
            supplier: coerce::optional_text(wire.fornecedor),
            status,
        })
    }
}

// =============================================================================
// Tax (impostos)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireTax {
    pub id: Option<WireId>,
    pub descricao: Option<String>,
    pub nome: Option<String>,
    /// Rate as a percentage.
    pub valor: Option<WireNumber>,
}

impl TryFrom<WireTax> for Tax {
    type Error = DataError;

    fn try_from(wire: WireTax) -> DataResult<Self> {
        let label = coerce::optional_text(wire.descricao)
            .or_else(|| coerce::optional_text(wire.nome))
            .unwrap_or_default();

        Ok(Tax {
            id: coerce::required_id("id", wire.id)?,
            label,
            rate: coerce::rate("valor", wire.valor.as_ref())?,
        })
    }
}

// =============================================================================
// Invoice (faturas)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireInvoiceItem {
    pub produto_id: Option<WireId>,
    pub quantidade: Option<WireNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireInvoice {
    pub id: Option<WireId>,
    pub numero: Option<WireId>,
    pub cliente_id: Option<WireId>,
    pub data: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub itens: Vec<WireInvoiceItem>,
    pub valor: Option<WireNumber>,
}

impl TryFrom<WireInvoiceItem> for InvoiceItem {
    type Error = DataError;

    fn try_from(wire: WireInvoiceItem) -> DataResult<Self> {
        Ok(InvoiceItem {
            product_id: coerce::required_id("produto_id", wire.produto_id)?,
            quantity: coerce::quantity("quantidade", wire.quantidade.as_ref(), 0)?,
        })
    }
}

impl TryFrom<WireInvoice> for Invoice {
    type Error = DataError;

    fn try_from(wire: WireInvoice) -> DataResult<Self> {
        let status = coerce::optional_text(wire.status).ok_or_else(|| DataError::missing("status"))?;
        let items = wire
            .itens
            .into_iter()
            .map(InvoiceItem::try_from)
            .collect::<DataResult<Vec<_>>>()?;

        Ok(Invoice {
            id: coerce::required_id("id", wire.id)?,
            number: coerce::optional_id(wire.numero).unwrap_or_default(),
            client_id: coerce::optional_id(wire.cliente_id).unwrap_or_default(),
            date: coerce::date("data", wire.data.as_deref())?,
            status: coerce::invoice_status("status", &status)?,
            items,
            value: coerce::optional_amount("valor", wire.valor.as_ref())?,
        })
    }
}

// =============================================================================
// Ledger Entry (lancamentos)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireLedgerEntry {
    pub id: Option<WireId>,
    pub descricao: Option<String>,
    pub tipo: Option<String>,
    pub valor: Option<WireNumber>,
    pub data: Option<String>,
    pub categoria: Option<String>,
    pub metodo_pagamento: Option<String>,
    pub status: Option<String>,
    pub observacoes: Option<String>,
}

impl TryFrom<WireLedgerEntry> for LedgerEntry {
    type Error = DataError;

    fn try_from(wire: WireLedgerEntry) -> DataResult<Self> {
        let kind = coerce::optional_text(wire.tipo).ok_or_else(|| DataError::missing("tipo"))?;
        let status = match coerce::optional_text(wire.status) {
            Some(label) => coerce::entry_status("status", &label)?,
            None => EntryStatus::Completed,
        };

        Ok(LedgerEntry {
            id: coerce::required_id("id", wire.id)?,
            description: text(wire.descricao),
            kind: coerce::entry_kind("tipo", &kind)?,
            amount: coerce::amount("valor", wire.valor.as_ref())?,
            date: coerce::date("data", wire.data.as_deref())?,
            category: text(wire.categoria),
            payment_method: text(wire.metodo_pagamento),
            status,
            notes: coerce::optional_text(wire.observacoes),
        })
    }
}

// =============================================================================
// People (clientes, contabilistas)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireClient {
    pub id: Option<WireId>,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<WireId>,
}

impl TryFrom<WireClient> for Client {
    type Error = DataError;

    fn try_from(wire: WireClient) -> DataResult<Self> {
        Ok(Client {
            id: coerce::required_id("id", wire.id)?,
            name: text(wire.nome),
            email: text(wire.email),
            phone: coerce::optional_id(wire.telefone).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAccountant {
    pub id: Option<WireId>,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<WireId>,
    pub nif: Option<WireId>,
    pub especialidade: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<WireAccountant> for Accountant {
    type Error = DataError;

    fn try_from(wire: WireAccountant) -> DataResult<Self> {
        let status = match coerce::optional_text(wire.status) {
            Some(label) => coerce::active_status("status", &label)?,
            None => ActiveStatus::Active,
        };

        Ok(Accountant {
            id: coerce::required_id("id", wire.id)?,
            name: text(wire.nome),
            email: text(wire.email),
            phone: coerce::optional_id(wire.telefone).unwrap_or_default(),
            tax_number: coerce::optional_id(wire.nif).unwrap_or_default(),
            specialty: text(wire.especialidade),
            status,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
