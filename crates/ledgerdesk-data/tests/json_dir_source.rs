//! Integration tests for JsonDirSource against a scratch data directory.

use std::fs;
use std::path::Path;

use ledgerdesk_core::aggregate::{ledger_totals, InvoiceSummary, ProductCatalog, ProductSummary};
use ledgerdesk_core::pricing::TaxTable;
use ledgerdesk_core::{CompanyId, Money};
use ledgerdesk_data::{CompanySnapshot, DataError, DataSource, JsonDirSource, ValidationMode};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    company: CompanyId,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let company = CompanyId::new("42");
        fs::create_dir_all(dir.path().join(company.as_str())).unwrap();
        Fixture { dir, company }
    }

    fn write(&self, collection: &str, json: &str) {
        let path = self
            .dir
            .path()
            .join(self.company.as_str())
            .join(format!("{collection}.json"));
        fs::write(path, json).unwrap();
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn source(&self) -> JsonDirSource {
        JsonDirSource::new(self.root())
    }
}

fn sample_company() -> Fixture {
    let fixture = Fixture::new();

    fixture.write(
        "produtos",
        r#"[
            {"id": 1, "nome": "Laptop Dell Inspiron", "preco": "12500.00", "preco_custo": "9800.00",
             "quantidade": 15, "quantidade_minima": 5, "categoria": "Eletrónicos", "imposto_id": 1},
            {"id": 5, "nome": "Software Office 365", "preco": 800, "preco_custo": 600,
             "quantidade": 100, "quantidade_minima": 10, "categoria": "Software", "imposto_id": "3"}
        ]"#,
    );
    fixture.write(
        "impostos",
        r#"[
            {"id": 1, "descricao": "IVA Padrão", "valor": 17},
            {"id": 3, "descricao": "Isento", "valor": "0"}
        ]"#,
    );
    fixture.write(
        "lancamentos",
        r#"[
            {"id": 1, "descricao": "Venda de Produtos", "tipo": "entrada", "valor": 2500,
             "data": "2024-01-15", "categoria": "Vendas", "status": "Concluído"},
            {"id": 2, "descricao": "Pagamento Fornecedor", "tipo": "saida", "valor": "1200.00",
             "data": "2024-01-14", "categoria": "Fornecedores", "status": "Concluído"},
            {"id": 3, "descricao": "Conta de Luz", "tipo": "saída", "valor": 450,
             "data": "2024-01-13", "categoria": "Utilidades", "status": "Pendente"}
        ]"#,
    );
    fixture.write(
        "faturas",
        r#"[
            {"id": 1, "numero": "FT-001", "cliente_id": 1, "data": "2024-01-10", "status": "Paga",
             "itens": [{"produto_id": 1, "quantidade": 1}]},
            {"id": 2, "numero": "FT-002", "cliente_id": 2, "data": "2024-01-12", "status": "Pendente",
             "valor": "500.00"}
        ]"#,
    );
    fixture.write(
        "clientes",
        r#"[{"id": 1, "nome": "Maputo Tech", "email": "geral@maputotech.co.mz", "telefone": 841234567}]"#,
    );

    fixture
}

#[test]
fn test_sample_company_figures() {
    let fixture = sample_company();
    let snapshot = CompanySnapshot::load(&fixture.source(), &fixture.company).unwrap();

    let products = ProductSummary::from_products(&snapshot.products);
    assert_eq!(products.total, 2);
    assert_eq!(products.stock_value, Money::from_cents(20_700_000));

    let totals = ledger_totals(&snapshot.ledger_entries);
    assert_eq!(totals.inflow, Money::from_cents(250_000));
    assert_eq!(totals.outflow, Money::from_cents(165_000));
    assert_eq!(totals.balance, Money::from_cents(85_000));

    let catalog = ProductCatalog::new(&snapshot.products);
    let invoices = InvoiceSummary::from_invoices(&snapshot.invoices, &catalog);
    assert_eq!(invoices.paid, 1);
    assert_eq!(invoices.pending, 1);
    assert_eq!(invoices.total_value, Money::from_cents(1_250_000 + 50_000));

    let taxes = TaxTable::new(&snapshot.taxes);
    assert_eq!(
        taxes.price_with_tax_for(&snapshot.products[0]),
        Money::from_cents(1_462_500)
    );
    assert_eq!(
        taxes.price_with_tax_for(&snapshot.products[1]),
        Money::from_cents(80_000)
    );
}

#[test]
fn test_missing_collections_are_empty() {
    let fixture = sample_company();
    let source = fixture.source();

    assert!(source.accountants(&fixture.company).unwrap().is_empty());

    let unknown = CompanyId::new("7");
    assert!(source.products(&unknown).unwrap().is_empty());
}

#[test]
fn test_companies_are_isolated() {
    let fixture = sample_company();
    let other = CompanyId::new("43");
    fs::create_dir_all(fixture.root().join(other.as_str())).unwrap();
    fs::write(
        fixture.root().join(other.as_str()).join("produtos.json"),
        r#"[{"id": 9, "nome": "Impressora", "preco": 300, "categoria": "Eletrónicos", "imposto_id": 1}]"#,
    )
    .unwrap();

    let source = fixture.source();
    let ours: Vec<String> = source
        .products(&fixture.company)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    let theirs: Vec<String> = source.products(&other).unwrap().into_iter().map(|p| p.id).collect();

    assert_eq!(ours, vec!["1", "5"]);
    assert_eq!(theirs, vec!["9"]);
}

#[test]
fn test_broken_json_reports_path() {
    let fixture = Fixture::new();
    fixture.write("impostos", "[{\"id\": 1,");

    let err = fixture.source().taxes(&fixture.company).unwrap_err();
    match err {
        DataError::Json { path, .. } => assert!(path.ends_with("42/impostos.json")),
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[test]
fn test_strict_mode_rejects_invalid_entry() {
    let fixture = Fixture::new();
    fixture.write(
        "lancamentos",
        r#"[{"id": 8, "descricao": "Ajuste", "tipo": "saida", "valor": 0, "data": "2024-02-01",
            "categoria": "Ajustes"}]"#,
    );

    let lenient = fixture.source();
    assert_eq!(lenient.ledger_entries(&fixture.company).unwrap().len(), 1);

    let strict = fixture.source().with_mode(ValidationMode::Strict);
    let err = strict.ledger_entries(&fixture.company).unwrap_err();
    assert!(matches!(err, DataError::Invalid { ref id, .. } if id == "8"));
}

#[test]
fn test_path_traversal_company_rejected() {
    let fixture = sample_company();
    let err = fixture
        .source()
        .products(&CompanyId::new("../42"))
        .unwrap_err();
    assert!(matches!(err, DataError::InvalidCompany(_)));
}

#[test]
fn test_strict_mode_rejects_out_of_range_tax() {
    let fixture = Fixture::new();
    fixture.write(
        "impostos",
        r#"[{"id": 1, "descricao": "IVA Padrão", "valor": 17},
            {"id": 2, "descricao": "IVA mal digitado", "valor": "170"}]"#,
    );

    assert_eq!(fixture.source().taxes(&fixture.company).unwrap().len(), 2);

    let strict = fixture.source().with_mode(ValidationMode::Strict);
    let err = strict.taxes(&fixture.company).unwrap_err();
    assert!(matches!(err, DataError::Invalid { entity: "impostos", ref id, .. } if id == "2"));
}

#[test]
fn test_lenient_load_survives_wrong_shaped_record() {
    let fixture = Fixture::new();
    fixture.write(
        "clientes",
        r#"[{"id": 1, "nome": "Maputo Tech"},
            {"id": 2, "nome": ["not", "a", "name"]},
            {"id": 3, "nome": "Beira Comercial"}]"#,
    );

    let names: Vec<String> = fixture
        .source()
        .clients(&fixture.company)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Maputo Tech", "Beira Comercial"]);

    let strict = fixture.source().with_mode(ValidationMode::Strict);
    assert!(matches!(
        strict.clients(&fixture.company).unwrap_err(),
        DataError::Json { .. }
    ));
}
