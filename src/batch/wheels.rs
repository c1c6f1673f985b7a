use crate::host::Host;

pub const WHEELS_COLLECTION: &str = "WHEELS";
pub const WHEELS_PREFIX: &str = "WHEELS_";

/// An object stays renderable when its name contains the requested variant.
pub fn is_selected(object_name: &str, variant: &str) -> bool {
    object_name.contains(variant)
}

/// Shows the objects of the `WHEELS` collection matching `variant` and hides
/// the rest. Without the collection every `WHEELS_*` object is handled
/// instead; with it, prefixed objects outside the collection are left alone.
/// Returns the number of objects hidden.
pub fn set_wheels<H: Host + ?Sized>(host: &mut H, variant: &str) -> usize {
    let candidates = match host.collection(WHEELS_COLLECTION) {
        Some(members) => members,
        None => host
            .object_names()
            .into_iter()
            .filter(|name| name.starts_with(WHEELS_PREFIX))
            .collect(),
    };

    let mut hidden = 0;
    for name in candidates {
        let hide = !is_selected(&name, variant);
        if host.set_hide_render(&name, hide) {
            log::debug!("'{}' hide_render = {}", name, hide);
            if hide {
                hidden += 1;
            }
        }
    }
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    #[test]
    fn substring_selection() {
        assert!(is_selected("WHEELS_SPORT", "SPORT"));
        assert!(is_selected("WHEELS_SPORT_L", "SPORT"));
        assert!(!is_selected("WHEELS_OFFROAD", "SPORT"));
        assert!(!is_selected("WHEELS_sport", "SPORT"));
    }

    #[test]
    fn prefix_fallback_hides_unselected() {
        let mut host = FakeHost::with_objects(&["WHEELS_SPORT", "WHEELS_OFFROAD", "body"]);
        assert_eq!(set_wheels(&mut host, "SPORT"), 1);
        assert!(!host.is_hidden("WHEELS_SPORT"));
        assert!(host.is_hidden("WHEELS_OFFROAD"));
        assert!(!host.is_hidden("body"));
    }

    #[test]
    fn selection_is_idempotent() {
        let mut host = FakeHost::with_objects(&["WHEELS_SPORT", "WHEELS_OFFROAD", "WHEELS_CLASSIC"]);
        set_wheels(&mut host, "OFFROAD");
        let once = host.objects.clone();
        set_wheels(&mut host, "OFFROAD");
        assert_eq!(host.objects, once);
    }

    #[test]
    fn reselection_shows_previously_hidden() {
        let mut host = FakeHost::with_objects(&["WHEELS_SPORT", "WHEELS_OFFROAD"]);
        set_wheels(&mut host, "SPORT");
        set_wheels(&mut host, "OFFROAD");
        assert!(host.is_hidden("WHEELS_SPORT"));
        assert!(!host.is_hidden("WHEELS_OFFROAD"));
    }

    #[test]
    fn collection_shadows_prefix_fallback() {
        let mut host = FakeHost::with_objects(&["rim_SPORT", "rim_OFFROAD", "WHEELS_OFFROAD"]);
        host.collections.insert(
            WHEELS_COLLECTION.to_owned(),
            vec!["rim_SPORT".to_owned(), "rim_OFFROAD".to_owned()],
        );

        assert_eq!(set_wheels(&mut host, "SPORT"), 1);
        assert!(!host.is_hidden("rim_SPORT"));
        assert!(host.is_hidden("rim_OFFROAD"));
        // outside the collection, so untouched
        assert!(!host.is_hidden("WHEELS_OFFROAD"));
    }

    #[test]
    fn missing_members_and_objects_are_ignored() {
        let mut host = FakeHost::with_objects(&["body"]);
        host.collections
            .insert(WHEELS_COLLECTION.to_owned(), vec!["ghost".to_owned()]);
        assert_eq!(set_wheels(&mut host, "SPORT"), 0);

        let mut host = FakeHost::default();
        assert_eq!(set_wheels(&mut host, "SPORT"), 0);
    }
}
