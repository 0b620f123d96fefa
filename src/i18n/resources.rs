//! Embedded translation tables for the core namespaces.
//!
//! ## Adding a key
//!
//! 1. Add the English entry to the `EN_*` table
//! 2. Add translations to the other languages (missing keys fall back to English)

/// Key/value pairs of one (language, namespace) bundle
pub type Table = &'static [(&'static str, &'static str)];

/// Every embedded bundle as (language, namespace, table)
pub const RESOURCES: &[(&str, &str, Table)] = &[
    ("en", "common", EN_COMMON),
    ("sq", "common", SQ_COMMON),
    ("fr", "common", FR_COMMON),
    ("de", "common", DE_COMMON),
    ("tr", "common", TR_COMMON),
    ("en", "features", EN_FEATURES),
    ("sq", "features", SQ_FEATURES),
    ("fr", "features", FR_FEATURES),
    ("de", "features", DE_FEATURES),
    ("tr", "features", TR_FEATURES),
    ("en", "popup", EN_POPUP),
    ("sq", "popup", SQ_POPUP),
    ("fr", "popup", FR_POPUP),
    ("de", "popup", DE_POPUP),
    ("tr", "popup", TR_POPUP),
    ("en", "package", EN_PACKAGE),
    ("sq", "package", SQ_PACKAGE),
    ("fr", "package", FR_PACKAGE),
    ("de", "package", DE_PACKAGE),
    ("tr", "package", TR_PACKAGE),
    ("en", "balanceChecker", EN_BALANCE),
    ("sq", "balanceChecker", SQ_BALANCE),
    ("fr", "balanceChecker", FR_BALANCE),
    ("de", "balanceChecker", DE_BALANCE),
    ("tr", "balanceChecker", TR_BALANCE),
    ("en", "conversion", EN_CONVERSION),
    ("sq", "conversion", SQ_CONVERSION),
    ("fr", "conversion", FR_CONVERSION),
    ("de", "conversion", DE_CONVERSION),
    ("tr", "conversion", TR_CONVERSION),
    ("en", "deviceChecker", EN_DEVICE),
    ("sq", "deviceChecker", SQ_DEVICE),
    ("fr", "deviceChecker", FR_DEVICE),
    ("de", "deviceChecker", DE_DEVICE),
    ("tr", "deviceChecker", TR_DEVICE),
];

// ==================== common (navigation) ====================

const EN_COMMON: Table = &[
    ("nav.home", "Home"),
    ("nav.destinations", "Destinations"),
    ("nav.business", "Business"),
    ("nav.faq", "FAQ"),
    ("nav.press", "Press"),
    ("nav.contact", "Contact"),
    ("footer.rights", "All rights reserved."),
    ("footer.newsletter", "Subscribe to our newsletter"),
];

const SQ_COMMON: Table = &[
    ("nav.home", "Kryefaqja"),
    ("nav.destinations", "Destinacionet"),
    ("nav.business", "Biznes"),
    ("nav.faq", "Pyetje të shpeshta"),
    ("nav.press", "Shtypi"),
    ("nav.contact", "Kontakt"),
    ("footer.rights", "Të gjitha të drejtat e rezervuara."),
];

const FR_COMMON: Table = &[
    ("nav.home", "Accueil"),
    ("nav.destinations", "Destinations"),
    ("nav.business", "Entreprises"),
    ("nav.faq", "FAQ"),
    ("nav.press", "Presse"),
    ("nav.contact", "Contact"),
    ("footer.rights", "Tous droits réservés."),
    ("footer.newsletter", "Abonnez-vous à notre newsletter"),
];

const DE_COMMON: Table = &[
    ("nav.home", "Startseite"),
    ("nav.destinations", "Reiseziele"),
    ("nav.business", "Geschäftskunden"),
    ("nav.faq", "FAQ"),
    ("nav.press", "Presse"),
    ("nav.contact", "Kontakt"),
    ("footer.rights", "Alle Rechte vorbehalten."),
    ("footer.newsletter", "Newsletter abonnieren"),
];

const TR_COMMON: Table = &[
    ("nav.home", "Ana Sayfa"),
    ("nav.destinations", "Destinasyonlar"),
    ("nav.business", "Kurumsal"),
    ("nav.faq", "SSS"),
    ("nav.press", "Basın"),
    ("nav.contact", "İletişim"),
    ("footer.rights", "Tüm hakları saklıdır."),
];

// ==================== features ====================

const EN_FEATURES: Table = &[
    ("title", "Why travellers choose us"),
    ("instant.title", "Instant activation"),
    ("instant.description", "Scan the QR code and get online in minutes."),
    ("coverage.title", "Coverage in {{count}} countries"),
    ("support.title", "24/7 support"),
];

const SQ_FEATURES: Table = &[
    ("title", "Pse udhëtarët na zgjedhin"),
    ("instant.title", "Aktivizim i menjëhershëm"),
    ("instant.description", "Skanoni kodin QR dhe lidhuni për pak minuta."),
    ("coverage.title", "Mbulim në {{count}} vende"),
    ("support.title", "Mbështetje 24/7"),
];

const FR_FEATURES: Table = &[
    ("title", "Pourquoi les voyageurs nous choisissent"),
    ("instant.title", "Activation instantanée"),
    ("instant.description", "Scannez le QR code et connectez-vous en quelques minutes."),
    ("coverage.title", "Couverture dans {{count}} pays"),
    ("support.title", "Assistance 24h/24, 7j/7"),
];

const DE_FEATURES: Table = &[
    ("title", "Warum Reisende uns wählen"),
    ("instant.title", "Sofortige Aktivierung"),
    ("instant.description", "QR-Code scannen und in wenigen Minuten online sein."),
    ("coverage.title", "Netzabdeckung in {{count}} Ländern"),
    ("support.title", "Support rund um die Uhr"),
];

const TR_FEATURES: Table = &[
    ("title", "Gezginler neden bizi seçiyor"),
    ("instant.title", "Anında aktivasyon"),
    ("instant.description", "QR kodu tarayın ve dakikalar içinde bağlanın."),
    ("coverage.title", "{{count}} ülkede kapsama"),
    ("support.title", "7/24 destek"),
];

// ==================== popup ====================

const EN_POPUP: Table = &[
    ("title", "Get 10% off your first eSIM"),
    ("description", "Join our list and receive your discount code."),
    ("cta", "Claim discount"),
    ("dismiss", "No thanks"),
];

const SQ_POPUP: Table = &[
    ("title", "Përfitoni 10% zbritje në eSIM-in e parë"),
    ("description", "Regjistrohuni dhe merrni kodin e zbritjes."),
    ("cta", "Merr zbritjen"),
    ("dismiss", "Jo, faleminderit"),
];

const FR_POPUP: Table = &[
    ("title", "10 % de réduction sur votre première eSIM"),
    ("description", "Inscrivez-vous et recevez votre code promo."),
    ("cta", "Obtenir la réduction"),
    ("dismiss", "Non merci"),
];

const DE_POPUP: Table = &[
    ("title", "10 % Rabatt auf Ihre erste eSIM"),
    ("description", "Melden Sie sich an und erhalten Sie Ihren Rabattcode."),
    ("cta", "Rabatt sichern"),
    ("dismiss", "Nein danke"),
];

const TR_POPUP: Table = &[
    ("title", "İlk eSIM'inizde %10 indirim"),
    ("description", "Listemize katılın ve indirim kodunuzu alın."),
    ("cta", "İndirimi al"),
    ("dismiss", "Hayır, teşekkürler"),
];

// ==================== package ====================

const EN_PACKAGE: Table = &[
    ("valid.for", "Valid for"),
    ("days", "{{count}} days"),
    ("data", "Data"),
    ("buy.now", "Buy now"),
    ("unlimited", "Unlimited"),
];

const SQ_PACKAGE: Table = &[
    ("valid.for", "E vlefshme për"),
    ("days", "{{count}} ditë"),
    ("data", "Të dhëna"),
    ("buy.now", "Bli tani"),
    ("unlimited", "Pa limit"),
];

const FR_PACKAGE: Table = &[
    ("valid.for", "Valable pendant"),
    ("days", "{{count}} jours"),
    ("data", "Données"),
    ("buy.now", "Acheter"),
    ("unlimited", "Illimité"),
];

const DE_PACKAGE: Table = &[
    ("valid.for", "Gültig für"),
    ("days", "{{count}} Tage"),
    ("data", "Datenvolumen"),
    ("buy.now", "Jetzt kaufen"),
    ("unlimited", "Unbegrenzt"),
];

const TR_PACKAGE: Table = &[
    ("valid.for", "Geçerlilik süresi"),
    ("days", "{{count}} gün"),
    ("data", "Veri"),
    ("buy.now", "Hemen satın al"),
    ("unlimited", "Sınırsız"),
];

// ==================== balanceChecker ====================

const EN_BALANCE: Table = &[
    ("title", "Check your balance"),
    ("iccid.label", "ICCID"),
    ("submit", "Check balance"),
    ("remaining", "{{amount}} remaining"),
    ("not.found", "We could not find this eSIM."),
];

const SQ_BALANCE: Table = &[
    ("title", "Kontrolloni balancën"),
    ("iccid.label", "ICCID"),
    ("submit", "Kontrollo balancën"),
    ("remaining", "{{amount}} të mbetura"),
    ("not.found", "Nuk e gjetëm këtë eSIM."),
];

const FR_BALANCE: Table = &[
    ("title", "Vérifiez votre solde"),
    ("iccid.label", "ICCID"),
    ("submit", "Vérifier le solde"),
    ("remaining", "{{amount}} restants"),
    ("not.found", "Nous n'avons pas trouvé cette eSIM."),
];

const DE_BALANCE: Table = &[
    ("title", "Guthaben prüfen"),
    ("iccid.label", "ICCID"),
    ("submit", "Guthaben abfragen"),
    ("remaining", "{{amount}} verbleibend"),
    ("not.found", "Diese eSIM wurde nicht gefunden."),
];

const TR_BALANCE: Table = &[
    ("title", "Bakiyenizi kontrol edin"),
    ("iccid.label", "ICCID"),
    ("submit", "Bakiyeyi kontrol et"),
    ("remaining", "{{amount}} kaldı"),
    ("not.found", "Bu eSIM bulunamadı."),
];

// ==================== conversion ====================

const EN_CONVERSION: Table = &[
    ("headline", "Travelling to {{country}}?"),
    ("body", "Skip roaming fees with a local data plan."),
    ("cta", "See plans"),
];

const SQ_CONVERSION: Table = &[
    ("headline", "Po udhëtoni për në {{country}}?"),
    ("body", "Shmangni tarifat e roaming-ut me një plan lokal interneti."),
    ("cta", "Shiko planet"),
];

const FR_CONVERSION: Table = &[
    ("headline", "Vous partez en {{country}} ?"),
    ("body", "Évitez les frais d'itinérance avec un forfait local."),
    ("cta", "Voir les forfaits"),
];

const DE_CONVERSION: Table = &[
    ("headline", "Reisen Sie nach {{country}}?"),
    ("body", "Vermeiden Sie Roaming-Gebühren mit einem lokalen Datentarif."),
    ("cta", "Tarife ansehen"),
];

const TR_CONVERSION: Table = &[
    ("headline", "{{country}} seyahatiniz mi var?"),
    ("body", "Yerel bir veri paketiyle dolaşım ücretlerinden kurtulun."),
    ("cta", "Paketleri gör"),
];

// ==================== deviceChecker ====================

const EN_DEVICE: Table = &[
    ("title", "Is your phone eSIM compatible?"),
    ("search.placeholder", "Search your device"),
    ("compatible", "{{device}} supports eSIM"),
    ("incompatible", "{{device}} does not support eSIM"),
];

const SQ_DEVICE: Table = &[
    ("title", "A është telefoni juaj i përputhshëm me eSIM?"),
    ("search.placeholder", "Kërkoni pajisjen tuaj"),
    ("compatible", "{{device}} mbështet eSIM"),
    ("incompatible", "{{device}} nuk mbështet eSIM"),
];

const FR_DEVICE: Table = &[
    ("title", "Votre téléphone est-il compatible eSIM ?"),
    ("search.placeholder", "Recherchez votre appareil"),
    ("compatible", "{{device}} est compatible eSIM"),
    ("incompatible", "{{device}} n'est pas compatible eSIM"),
];

const DE_DEVICE: Table = &[
    ("title", "Ist Ihr Handy eSIM-fähig?"),
    ("search.placeholder", "Gerät suchen"),
    ("compatible", "{{device}} unterstützt eSIM"),
    ("incompatible", "{{device}} unterstützt kein eSIM"),
];

const TR_DEVICE: Table = &[
    ("title", "Telefonunuz eSIM uyumlu mu?"),
    ("search.placeholder", "Cihazınızı arayın"),
    ("compatible", "{{device}} eSIM destekliyor"),
    ("incompatible", "{{device}} eSIM desteklemiyor"),
];
