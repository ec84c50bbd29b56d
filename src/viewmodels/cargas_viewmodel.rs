// ============================================================================
// CARGAS VIEWMODEL - Filtros, paginación y filas de la lista
// ============================================================================
// Funciones puras sobre la lista ya descargada. El componente solo guarda
// estado (lista, filtros, página) y llama a esto en cada render.
// ============================================================================

use crate::models::Carga;
use crate::utils::{format_datetime_pt_br, or_placeholder, PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Id3zx,
    IdCliente,
    OrigemUf,
    OrigemMunicipio,
    DestinoUf,
    DestinoMunicipio,
}

/// Filtros activos. Vacío = no filtra
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CargaFilters {
    pub id_3zx: String,
    pub id_cliente: String,
    pub origem_uf: String,
    pub origem_municipio: String,
    pub destino_uf: String,
    pub destino_municipio: String,
}

fn contains_ci(value: Option<&str>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    value
        .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn code_matches(value: Option<&str>, code: &str) -> bool {
    code.is_empty() || value == Some(code)
}

impl CargaFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Id3zx => &self.id_3zx,
            FilterField::IdCliente => &self.id_cliente,
            FilterField::OrigemUf => &self.origem_uf,
            FilterField::OrigemMunicipio => &self.origem_municipio,
            FilterField::DestinoUf => &self.destino_uf,
            FilterField::DestinoMunicipio => &self.destino_municipio,
        }
    }

    /// Copia con un campo cambiado
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FilterField::Id3zx => next.id_3zx = value,
            FilterField::IdCliente => next.id_cliente = value,
            FilterField::OrigemUf => next.origem_uf = value,
            FilterField::OrigemMunicipio => next.origem_municipio = value,
            FilterField::DestinoUf => next.destino_uf = value,
            FilterField::DestinoMunicipio => next.destino_municipio = value,
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Texto: substring sin mayúsculas. Categóricos: igualdad exacta del código
    pub fn matches(&self, carga: &Carga) -> bool {
        contains_ci(carga.id_3zx.as_deref(), &self.id_3zx)
            && contains_ci(carga.id_cliente.as_deref(), &self.id_cliente)
            && code_matches(carga.origem_uf_cod(), &self.origem_uf)
            && code_matches(carga.origem_municipio_cod(), &self.origem_municipio)
            && code_matches(carga.destino_uf_cod(), &self.destino_uf)
            && code_matches(carga.destino_municipio_cod(), &self.destino_municipio)
    }
}

/// Mantiene el orden original
pub fn filter_cargas<'a>(cargas: &'a [Carga], filters: &CargaFilters) -> Vec<&'a Carga> {
    cargas.iter().filter(|c| filters.matches(c)).collect()
}

/// `ceil(total / PAGE_SIZE)`
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Página visible dentro de `[1, max(1, page_count)]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, page_count(total).max(1))
}

/// Elementos de la página `page` (1-based, ya acotada)
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Vec<T> {
    let page = clamp_page(page, items.len());
    items
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

// ============================================================================
// OPCIONES DE FILTRO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub origem_uf: Vec<FilterOption>,
    pub origem_municipio: Vec<FilterOption>,
    pub destino_uf: Vec<FilterOption>,
    pub destino_municipio: Vec<FilterOption>,
}

fn push_unique(options: &mut Vec<FilterOption>, code: Option<&str>, label: Option<&str>) {
    let Some(code) = code.filter(|c| !c.is_empty()) else {
        return;
    };
    if options.iter().any(|o| o.code == code) {
        return;
    }
    options.push(FilterOption {
        code: code.to_string(),
        label: label.filter(|l| !l.is_empty()).unwrap_or(code).to_string(),
    });
}

impl FilterOptions {
    /// Opciones sin repetir, en orden de aparición
    pub fn from_cargas(cargas: &[Carga]) -> Self {
        let mut options = Self::default();
        for carga in cargas {
            if let Some(uf) = &carga.origem_uf {
                push_unique(&mut options.origem_uf, uf.cod.as_deref(), uf.uf.as_deref());
            }
            if let Some(m) = &carga.origem_municipio {
                push_unique(&mut options.origem_municipio, m.cod.as_deref(), m.municipio.as_deref());
            }
            if let Some(uf) = &carga.destino_uf {
                push_unique(&mut options.destino_uf, uf.cod.as_deref(), uf.uf.as_deref());
            }
            if let Some(m) = &carga.destino_municipio {
                push_unique(&mut options.destino_municipio, m.cod.as_deref(), m.municipio.as_deref());
            }
        }
        options
    }

    pub fn for_field(&self, field: FilterField) -> &[FilterOption] {
        match field {
            FilterField::OrigemUf => &self.origem_uf,
            FilterField::OrigemMunicipio => &self.origem_municipio,
            FilterField::DestinoUf => &self.destino_uf,
            FilterField::DestinoMunicipio => &self.destino_municipio,
            FilterField::Id3zx | FilterField::IdCliente => &[],
        }
    }
}

// ============================================================================
// FILAS DE LA TABLA
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CargaRow {
    pub id: String,
    pub id_3zx: String,
    pub id_cliente: String,
    pub origem: String,
    pub destino: String,
    pub eta: String,
    pub etd: String,
    pub status_label: String,
    pub status_class: &'static str,
}

impl From<&Carga> for CargaRow {
    fn from(carga: &Carga) -> Self {
        Self {
            id: carga.id.clone(),
            id_3zx: or_placeholder(carga.id_3zx.as_deref()),
            id_cliente: or_placeholder(carga.id_cliente.as_deref()),
            origem: carga.origem_label(),
            destino: carga.destino_label(),
            eta: format_datetime_pt_br(carga.eta_programado()),
            etd: format_datetime_pt_br(carga.etd_programado()),
            status_label: carga.status.label(),
            status_class: carga.status.kind().css_class(),
        }
    }
}

/// Página visible ya proyectada a filas
#[derive(Debug, Clone, PartialEq)]
pub struct CargasPage {
    pub rows: Vec<CargaRow>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_total: usize,
}

impl CargasPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// La página guardada no se toca al cambiar filtros; solo se acota al mostrar
pub fn build_page(cargas: &[Carga], filters: &CargaFilters, page: usize) -> CargasPage {
    let filtered = filter_cargas(cargas, filters);
    let rows: Vec<CargaRow> = paginate(&filtered, page)
        .into_iter()
        .map(CargaRow::from)
        .collect();
    CargasPage {
        rows,
        page: clamp_page(page, filtered.len()),
        page_count: page_count(filtered.len()),
        filtered_total: filtered.len(),
    }
}
