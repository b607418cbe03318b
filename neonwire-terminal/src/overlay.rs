/// Hero overlay: positioned labels that the pointer can land on
use neonwire_core::Element;

/// How a region is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    /// Plain accent text
    Accent,
    /// White headline text
    Headline,
    /// Bracketed, highlighted when hovered
    Button,
}

/// A labelled rectangle of cells
#[derive(Debug, Clone)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: RegionStyle,
    pub element: Element,
}

impl Region {
    pub fn width(&self) -> u16 {
        self.text.chars().count() as u16
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.width())
    }
}

/// Overlay regions for one terminal size, topmost last
#[derive(Debug, Clone, Default)]
pub struct Layout {
    regions: Vec<Region>,
    marquee_row: Option<u16>,
}

impl Layout {
    /// Navbar, title block and call-to-action, centered for `width × height`
    pub fn hero(width: u16, height: u16) -> Self {
        let mut layout = Self::default();
        if width < 4 || height < 4 {
            return layout;
        }

        layout.push(2, 1, "W3.UAE", RegionStyle::Accent, Element::plain("logo"));
        let menu = "[ ≡ ]";
        layout.push(
            width.saturating_sub(menu.chars().count() as u16 + 2),
            1,
            menu,
            RegionStyle::Button,
            Element::interactive("menu"),
        );

        let middle = height / 2;
        layout.push_centered(width, middle.saturating_sub(2), "W E B 3   U A E", RegionStyle::Headline, Element::plain("title"));
        layout.push_centered(
            width,
            middle,
            "Dijital Geleceği İnşa Ediyoruz",
            RegionStyle::Accent,
            Element::plain("subtitle"),
        );
        layout.push_centered(
            width,
            middle + 2,
            "[ PROJEYİ BAŞLAT ]",
            RegionStyle::Button,
            Element::interactive("cta"),
        );

        if height > 8 {
            layout.marquee_row = Some(height - 2);
        }
        layout
    }

    fn push(&mut self, x: u16, y: u16, text: &str, style: RegionStyle, element: Element) {
        self.regions.push(Region {
            x,
            y,
            text: text.to_string(),
            style,
            element,
        });
    }

    fn push_centered(&mut self, width: u16, y: u16, text: &str, style: RegionStyle, element: Element) {
        let len = text.chars().count() as u16;
        self.push(width.saturating_sub(len) / 2, y, text, style, element);
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Row reserved for the scrolling ticker, if the terminal is tall enough
    pub fn marquee_row(&self) -> Option<u16> {
        self.marquee_row
    }

    /// The topmost element under a cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&Element> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.contains(column, row))
            .map(|region| &region.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neonwire_core::{CursorProximity, HoverState, Interactive};

    fn region<'a>(layout: &'a Layout, label: &str) -> &'a Region {
        layout
            .regions()
            .iter()
            .find(|r| r.element.label() == label)
            .unwrap()
    }

    #[test]
    fn test_buttons_are_interactive() {
        let layout = Layout::hero(80, 24);
        let cta = region(&layout, "cta");
        let hit = layout.hit_test(cta.x, cta.y).unwrap();
        assert!(hit.is_interactive());

        let title = region(&layout, "title");
        assert!(!layout.hit_test(title.x + 1, title.y).unwrap().is_interactive());
    }

    #[test]
    fn test_empty_space_misses() {
        let layout = Layout::hero(80, 24);
        assert!(layout.hit_test(0, 23).is_none());
        let cta = region(&layout, "cta");
        assert!(layout.hit_test(cta.x + cta.width(), cta.y).is_none());
    }

    #[test]
    fn test_sweep_over_cta_toggles_hover() {
        let layout = Layout::hero(80, 24);
        let cta = region(&layout, "cta");
        let mut machine = CursorProximity::new();

        let mut states = Vec::new();
        for column in cta.x.saturating_sub(1)..=cta.x + cta.width() {
            states.push(machine.on_pointer_event(layout.hit_test(column, cta.y)));
        }
        assert_eq!(states.first(), Some(&HoverState::Idle));
        assert_eq!(states[1], HoverState::Hovering);
        assert_eq!(states.last(), Some(&HoverState::Idle));
        assert_eq!(machine.transitions(), 2);
    }

    #[test]
    fn test_menu_is_right_aligned() {
        let layout = Layout::hero(80, 24);
        let menu = region(&layout, "menu");
        assert_eq!(menu.x + menu.width(), 78);
    }

    #[test]
    fn test_tiny_terminal_has_no_regions() {
        let layout = Layout::hero(3, 3);
        assert!(layout.regions().is_empty());
        assert!(layout.marquee_row().is_none());
    }
}
