//! Built-in lookup tables.
//!
//! All entries are stored in normalized form (lowercase, no diacritics).
//! Components copy these into their own tables at construction, so tests and
//! other locales can supply different ones.

/// Spanish function words and narration filler.
pub const STOPWORDS_ES: &[&str] = &[
    "a", "al", "algo", "alguien", "algun", "alguna", "algunas", "algunos", "ante", "antes",
    "aqui", "asi", "aun", "bien", "cada", "casi", "como", "con", "contra", "cual", "cuales",
    "cuando", "cuanto", "de", "del", "desde", "donde", "dos", "el", "ella", "ellas", "ellos",
    "en", "entre", "era", "eran", "es", "esa", "esas", "ese", "eso", "esos", "esta", "estan",
    "estas", "este", "esto", "estos", "estar", "fue", "fueron", "gran", "ha", "han", "hace",
    "hacen", "hacer", "hasta", "hay", "hoy", "la", "las", "le", "les", "lo", "los", "mas",
    "me", "menos", "mi", "mis", "mucho", "muchos", "muy", "nada", "ni", "no", "nos", "nosotros",
    "nuestra", "nuestro", "nueva", "nuevas", "nuevo", "nuevos", "o", "otra", "otras", "otro",
    "otros", "para", "pero", "poco", "por", "porque", "puede", "pueden", "que", "quien",
    "se", "sea", "segun", "ser", "si", "sido", "siempre", "sin", "sobre", "solo", "son", "su",
    "sus", "tal", "tambien", "tan", "tanto", "te", "tiene", "tienen", "todo", "todos", "tras",
    "tu", "tus", "un", "una", "unas", "uno", "unos", "va", "van", "vez", "y", "ya", "yo",
    "ahora", "asi", "cosa", "cosas", "creo", "dice", "dicen", "embargo", "acaba", "anuncia",
    "anuncio", "parece", "sigue", "siguenos", "sigueme", "comenta", "comentame", "cuentame",
    "dale", "like", "suscribete", "comparte", "opinas", "piensas", "crees", "video", "noticia",
    "ademas", "mientras", "opinion", "resumen", "importante", "realmente", "entonces", "pues",
];

/// English function words and narration filler.
pub const STOPWORDS_EN: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "he", "her", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "just",
    "more", "most", "my", "new", "not", "now", "of", "on", "one", "or", "our", "out", "over",
    "she", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "to", "up", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "why", "will", "with", "would", "you", "your", "think", "follow",
    "subscribe", "comment", "today", "news", "really", "just",
];

/// Domain terms that outrank plain frequency. Multi-word entries are phrases.
pub const TECHNICAL_TERMS: &[&str] = &[
    "inteligencia artificial",
    "artificial intelligence",
    "aprendizaje automatico",
    "machine learning",
    "centro de datos",
    "data center",
    "realidad virtual",
    "realidad aumentada",
    "virtual reality",
    "computacion cuantica",
    "quantum computing",
    "coche electrico",
    "vehiculo electrico",
    "redes sociales",
    "mundos virtuales",
    "ia",
    "ai",
    "5g",
    "robot",
    "robots",
    "robotica",
    "humanoide",
    "humanoides",
    "chip",
    "chips",
    "gpu",
    "gpus",
    "procesador",
    "semiconductores",
    "nube",
    "cloud",
    "algoritmo",
    "chatbot",
    "blockchain",
    "bitcoin",
    "criptomoneda",
    "criptomonedas",
    "metaverso",
    "smartphone",
    "ciberseguridad",
    "ciberataque",
    "hackers",
    "cuantica",
    "quantum",
    "software",
    "startup",
    "app",
    "satelite",
    "cohete",
    "dron",
    "drones",
    "bateria",
    "baterias",
    "autonomo",
    "superordenador",
    "supercomputadora",
];

/// Discourse markers as `(phrase, weight, kind)`.
pub const TRANSITION_MARKERS: &[(&str, f64, MarkerKind)] = &[
    ("sin embargo", 1.0, MarkerKind::Contrast),
    ("no obstante", 1.0, MarkerKind::Contrast),
    ("por otro lado", 0.9, MarkerKind::Contrast),
    ("en cambio", 0.8, MarkerKind::Contrast),
    ("pero", 0.5, MarkerKind::Contrast),
    ("aunque", 0.5, MarkerKind::Contrast),
    ("ademas", 0.7, MarkerKind::Addition),
    ("asimismo", 0.7, MarkerKind::Addition),
    ("por su parte", 0.8, MarkerKind::Addition),
    ("mientras tanto", 0.8, MarkerKind::Addition),
    ("lo mas interesante", 0.8, MarkerKind::Addition),
    ("tambien", 0.4, MarkerKind::Addition),
    ("en mi opinion", 1.0, MarkerKind::Conclusion),
    ("en conclusion", 1.0, MarkerKind::Conclusion),
    ("en resumen", 0.9, MarkerKind::Conclusion),
    ("creo que", 0.8, MarkerKind::Conclusion),
    ("para mi", 0.7, MarkerKind::Conclusion),
    ("al final", 0.7, MarkerKind::Conclusion),
    ("lo importante", 0.7, MarkerKind::Conclusion),
    ("la clave", 0.7, MarkerKind::Conclusion),
    ("however", 1.0, MarkerKind::Contrast),
    ("on the other hand", 0.9, MarkerKind::Contrast),
    ("but", 0.5, MarkerKind::Contrast),
    ("meanwhile", 0.8, MarkerKind::Addition),
    ("moreover", 0.7, MarkerKind::Addition),
    ("also", 0.4, MarkerKind::Addition),
    ("in my opinion", 1.0, MarkerKind::Conclusion),
    ("in conclusion", 1.0, MarkerKind::Conclusion),
    ("in short", 0.9, MarkerKind::Conclusion),
    ("bottom line", 0.9, MarkerKind::Conclusion),
    ("i think", 0.8, MarkerKind::Conclusion),
];

/// Family of a discourse marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Contrastive ("sin embargo", "however")
    Contrast,
    /// Additive ("además", "meanwhile")
    Addition,
    /// Concluding or opinion cue ("en mi opinión", "in short")
    Conclusion,
}

/// Spanish → English search terms.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("inteligencia artificial", "artificial intelligence"),
    ("ia", "artificial intelligence"),
    ("aprendizaje automatico", "machine learning"),
    ("centro de datos", "data center"),
    ("realidad virtual", "virtual reality"),
    ("realidad aumentada", "augmented reality"),
    ("computacion cuantica", "quantum computing"),
    ("coche electrico", "electric car"),
    ("vehiculo electrico", "electric vehicle"),
    ("redes sociales", "social media"),
    ("mundos virtuales", "virtual worlds"),
    ("robot", "robot"),
    ("robots", "robots"),
    ("robotica", "robotics"),
    ("humanoide", "humanoid"),
    ("humanoides", "humanoid"),
    ("chip", "chip"),
    ("chips", "chips"),
    ("procesador", "processor"),
    ("semiconductores", "semiconductors"),
    ("nube", "cloud"),
    ("datos", "data"),
    ("algoritmo", "algorithm"),
    ("modelo", "model"),
    ("modelos", "models"),
    ("criptomoneda", "cryptocurrency"),
    ("criptomonedas", "cryptocurrency"),
    ("metaverso", "metaverse"),
    ("movil", "smartphone"),
    ("moviles", "smartphones"),
    ("telefono", "phone"),
    ("ciberseguridad", "cybersecurity"),
    ("ciberataque", "cyber attack"),
    ("cuantica", "quantum"),
    ("satelite", "satellite"),
    ("satelites", "satellites"),
    ("cohete", "rocket"),
    ("dron", "drone"),
    ("bateria", "battery"),
    ("baterias", "batteries"),
    ("autonomo", "autonomous"),
    ("superordenador", "supercomputer"),
    ("supercomputadora", "supercomputer"),
    ("empresa", "company"),
    ("empresas", "companies"),
    ("mercado", "market"),
    ("acciones", "stocks"),
    ("bolsa", "stock market"),
    ("inversion", "investment"),
    ("dinero", "money"),
    ("gobierno", "government"),
    ("ley", "law"),
    ("regulacion", "regulation"),
    ("privacidad", "privacy"),
    ("trabajo", "work"),
    ("empleo", "jobs"),
    ("empleos", "jobs"),
    ("trabajadores", "workers"),
    ("usuarios", "users"),
    ("ciudad", "city"),
    ("mundo", "world"),
    ("mundos", "worlds"),
    ("virtuales", "virtual"),
    ("juegos", "games"),
    ("videojuegos", "video games"),
    ("salud", "health"),
    ("medicina", "medicine"),
    ("medico", "doctor"),
    ("medicos", "doctors"),
    ("coche", "car"),
    ("coches", "cars"),
    ("energia", "energy"),
    ("espacio", "space"),
    ("luna", "moon"),
    ("marte", "mars"),
    ("ordenador", "computer"),
    ("ordenadores", "computers"),
    ("computadora", "computer"),
    ("pantalla", "screen"),
    ("gafas", "glasses"),
    ("reloj", "watch"),
    ("lanzamiento", "launch"),
    ("fabrica", "factory"),
    ("investigadores", "researchers"),
    ("ciencia", "science"),
    ("laboratorio", "laboratory"),
    ("estudiantes", "students"),
    ("educacion", "education"),
    ("escuela", "school"),
    ("seguridad", "security"),
    ("guerra", "war"),
    ("clima", "climate"),
    ("agua", "water"),
    ("red", "network"),
    ("voz", "voice"),
    ("asistente", "assistant"),
    ("busqueda", "search"),
    ("buscador", "search engine"),
    ("navegador", "browser"),
    ("correo", "email"),
    ("programadores", "programmers"),
    ("codigo", "code"),
    ("programacion", "programming"),
    ("futuro", "future"),
    ("tecnologia", "technology"),
    ("innovacion", "innovation"),
    ("ventas", "sales"),
    ("precio", "price"),
    ("precios", "prices"),
    ("clientes", "customers"),
    ("imagen", "image"),
    ("imagenes", "images"),
    ("privada", "private"),
];

/// Literal visual concepts as `(triggers, search phrase)`; first match wins.
pub const VISUAL_CONCEPTS: &[(&[&str], &str)] = &[
    (&["mundos virtuales", "metaverso", "virtual worlds", "metaverse"], "virtual worlds"),
    (
        &["robot humanoide", "robots humanoides", "humanoide", "humanoides", "humanoid robot"],
        "humanoid robot",
    ),
    (&["coche autonomo", "coches autonomos", "conduccion autonoma", "self driving"], "self driving car"),
    (
        &["coche electrico", "coches electricos", "vehiculo electrico", "electric car"],
        "electric car",
    ),
    (&["centro de datos", "centros de datos", "data center"], "data center servers"),
    (
        &["computacion cuantica", "ordenador cuantico", "quantum computer"],
        "quantum computer",
    ),
    (&["realidad virtual", "realidad mixta", "gafas de realidad", "vr headset"], "vr headset"),
    (&["cohete", "lanzamiento espacial", "rocket launch"], "rocket launch"),
    (&["semiconductores", "semiconductor", "procesador", "chip", "chips"], "computer chip"),
    (&["ciberataque", "hackers", "ciberseguridad", "cyber attack"], "cyber security"),
    (&["criptomoneda", "criptomonedas", "bitcoin", "blockchain"], "cryptocurrency"),
    (&["smartphone", "telefono movil", "movil"], "smartphone"),
    (&["dron", "drones"], "drone"),
    (&["satelite", "satelites"], "satellite"),
    (&["wall street", "bolsa de valores"], "stock market"),
    (&["chatbot", "asistente virtual"], "chatbot"),
];

/// Generic fallback queries per topic as `(topic, triggers, fallbacks)`.
///
/// The last entry is the default and has no triggers.
pub const TOPIC_FALLBACKS: &[(&str, &[&str], &[&str])] = &[
    (
        "ai",
        &["inteligencia artificial", "ia", "ai", "chatbot", "algoritmo", "modelo"],
        &["artificial intelligence", "neural network", "ai technology"],
    ),
    (
        "robotics",
        &["robot", "robots", "robotica", "humanoide", "humanoides"],
        &["robotics", "robot arm", "automation"],
    ),
    (
        "space",
        &["cohete", "espacio", "satelite", "nasa", "marte", "luna"],
        &["space exploration", "rocket", "satellite"],
    ),
    (
        "finance",
        &["bolsa", "acciones", "mercado", "inversion", "dinero"],
        &["stock market", "finance chart", "investment"],
    ),
    (
        "mobility",
        &["coche", "coches", "vehiculo", "bateria", "electrico"],
        &["electric vehicle", "car charging", "modern car"],
    ),
    (
        "technology",
        &[],
        &["technology", "digital innovation", "futuristic technology"],
    ),
];

/// Alt-text boilerplate typical of generic stock photography.
pub const GENERIC_PATTERNS: &[&str] = &[
    "stock photo",
    "stock image",
    "business meeting",
    "businessman",
    "businesswoman",
    "copy space",
    "isolated on white",
    "white background",
    "abstract background",
    "template",
    "mockup",
    "happy woman",
    "smiling",
    "handshake",
    "teamwork",
    "office workers",
    "texture",
];
