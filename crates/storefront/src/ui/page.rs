//! What the grid regions currently show.

use kinetic_core::Catalog;

use crate::render::{
    CATEGORY_SECTIONS, CardStyle, GridFragment, GridRegion, Placeholder, RenderError, SectionView,
    render_grid,
};
use crate::search::{self, SearchTerm};

/// Which view the grids are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageMode {
    /// The three category sections.
    Categories,
    /// A unified result list in the first region.
    SearchResults,
}

/// Rendered contents of every grid region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRegions {
    mode: PageMode,
    sections: Vec<SectionView>,
}

impl PageRegions {
    /// The categorized view: each section gets its category's visible
    /// products in grid markup, or "Coming Soon".
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a grid fails to render.
    pub fn categories(catalog: &Catalog) -> Result<Self, RenderError> {
        let sections = CATEGORY_SECTIONS
            .iter()
            .map(|section| {
                let items = catalog.visible_in_category(section.category);
                let grid =
                    render_grid(section.region, &items, CardStyle::Grid, Placeholder::ComingSoon)?;
                Ok(SectionView {
                    title: section.category,
                    anchor: section.region.anchor(),
                    grid,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(Self {
            mode: PageMode::Categories,
            sections,
        })
    }

    /// The search view: every match goes into the first region, the other
    /// regions are cleared.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the result grid fails to render.
    pub fn search_results(
        catalog: &Catalog,
        term: &SearchTerm,
        style: CardStyle,
    ) -> Result<Self, RenderError> {
        let matches = search::filter(catalog, term);
        let sections = CATEGORY_SECTIONS
            .iter()
            .map(|section| {
                let grid = if section.region == GridRegion::Exchange {
                    render_grid(section.region, &matches, style, Placeholder::NoResults)?
                } else {
                    GridFragment {
                        region: section.region,
                        html: String::new(),
                        card_count: 0,
                    }
                };
                Ok(SectionView {
                    title: section.category,
                    anchor: section.region.anchor(),
                    grid,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(Self {
            mode: PageMode::SearchResults,
            sections,
        })
    }

    #[must_use]
    pub const fn is_search(&self) -> bool {
        matches!(self.mode, PageMode::SearchResults)
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionView] {
        &self.sections
    }

    /// The fragment currently in `region`.
    #[must_use]
    pub fn grid(&self, region: GridRegion) -> Option<&GridFragment> {
        self.sections
            .iter()
            .map(|section| &section.grid)
            .find(|grid| grid.region == region)
    }

    /// Product cards across all regions.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|section| section.grid.card_count).sum()
    }
}
