//! Curated sector/industry/country classification for widely held names.
//!
//! Market data vendors intermittently return empty profile fields; these tables
//! fill the gaps. Labels use the vendor vocabulary and go through
//! [`super::normalize_sector`] like any other provider value.

use crate::domain::holding::has_known_ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub sector: &'static str,
    pub industry: &'static str,
    pub country: &'static str,
}

const fn c(sector: &'static str, industry: &'static str, country: &'static str) -> Classification {
    Classification {
        sector,
        industry,
        country,
    }
}

/// Maps stale or variant tickers from CUSIP resolvers to the current symbol.
pub fn resolve_alias(ticker: &str) -> String {
    let t = ticker.trim().to_ascii_uppercase();
    TICKER_ALIASES
        .iter()
        .find(|(from, _)| *from == t)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(t)
}

fn by_ticker(ticker: &str) -> Option<Classification> {
    SECTOR_TABLE
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, class)| *class)
}

/// Ticker (after alias resolution) first, then the exact upper-cased name,
/// then the first table name contained in the holding name.
pub fn lookup_fallback(ticker: &str, name: Option<&str>) -> Option<Classification> {
    if has_known_ticker(ticker) {
        if let Some(class) = by_ticker(&resolve_alias(ticker)) {
            return Some(class);
        }
    }

    let name = name.map(|n| n.trim().to_uppercase()).filter(|n| !n.is_empty())?;

    if let Some((_, t)) = NAME_TO_TICKER.iter().find(|(key, _)| *key == name) {
        if let Some(class) = by_ticker(t) {
            return Some(class);
        }
    }

    let (_, t) = NAME_TO_TICKER.iter().find(|(key, _)| name.contains(key))?;
    by_ticker(t)
}

const SECTOR_TABLE: &[(&str, Classification)] = &[
    ("AAPL", c("Technology", "Consumer Electronics", "United States")),
    ("MSFT", c("Technology", "Software—Infrastructure", "United States")),
    ("NVDA", c("Technology", "Semiconductors", "United States")),
    ("AVGO", c("Technology", "Semiconductors", "United States")),
    ("CSCO", c("Technology", "Communication Equipment", "United States")),
    ("ORCL", c("Technology", "Software—Infrastructure", "United States")),
    ("ADBE", c("Technology", "Software—Application", "United States")),
    ("CRM", c("Technology", "Software—Application", "United States")),
    ("AMD", c("Technology", "Semiconductors", "United States")),
    ("INTC", c("Technology", "Semiconductors", "United States")),
    ("QCOM", c("Technology", "Semiconductors", "United States")),
    ("IBM", c("Technology", "Information Technology Services", "United States")),
    ("NOW", c("Technology", "Software—Application", "United States")),
    ("INTU", c("Technology", "Software—Application", "United States")),
    ("PANW", c("Technology", "Software—Infrastructure", "United States")),
    ("SNPS", c("Technology", "Software—Application", "United States")),
    ("CDNS", c("Technology", "Software—Application", "United States")),
    ("AMAT", c("Technology", "Semiconductor Equipment & Materials", "United States")),
    ("LRCX", c("Technology", "Semiconductor Equipment & Materials", "United States")),
    ("KLAC", c("Technology", "Semiconductor Equipment & Materials", "United States")),
    ("MU", c("Technology", "Semiconductors", "United States")),
    ("MRVL", c("Technology", "Semiconductors", "United States")),
    ("TXN", c("Technology", "Semiconductors", "United States")),
    ("SHOP", c("Technology", "Software—Application", "Canada")),
    ("TSM", c("Technology", "Semiconductors", "Taiwan")),
    ("ASML", c("Technology", "Semiconductor Equipment & Materials", "Netherlands")),
    ("SAP", c("Technology", "Software—Application", "Germany")),
    ("PLTR", c("Technology", "Software—Application", "United States")),
    ("CRWD", c("Technology", "Software—Infrastructure", "United States")),
    ("FTNT", c("Technology", "Software—Infrastructure", "United States")),
    ("WDAY", c("Technology", "Software—Application", "United States")),
    ("TEAM", c("Technology", "Software—Application", "Australia")),
    ("DDOG", c("Technology", "Software—Application", "United States")),
    ("ZS", c("Technology", "Software—Infrastructure", "United States")),
    ("NET", c("Technology", "Software—Infrastructure", "United States")),
    ("SNOW", c("Technology", "Software—Application", "United States")),
    ("HUBS", c("Technology", "Software—Application", "United States")),
    ("ADSK", c("Technology", "Software—Application", "United States")),
    ("ANSS", c("Technology", "Software—Application", "United States")),
    ("NXPI", c("Technology", "Semiconductors", "Netherlands")),
    ("ON", c("Technology", "Semiconductors", "United States")),
    ("MPWR", c("Technology", "Semiconductors", "United States")),
    ("SMCI", c("Technology", "Computer Hardware", "United States")),
    ("DELL", c("Technology", "Computer Hardware", "United States")),
    ("HPQ", c("Technology", "Computer Hardware", "United States")),
    ("HPE", c("Technology", "Communication Equipment", "United States")),
    ("KEYS", c("Technology", "Scientific & Technical Instruments", "United States")),
    ("MCHP", c("Technology", "Semiconductors", "United States")),
    ("SWKS", c("Technology", "Semiconductors", "United States")),
    ("GFS", c("Technology", "Semiconductors", "United States")),
    ("ARM", c("Technology", "Semiconductors", "United Kingdom")),
    ("UBER", c("Technology", "Software—Application", "United States")),
    ("ABNB", c("Consumer Cyclical", "Travel Services", "United States")),
    ("COIN", c("Technology", "Software—Application", "United States")),
    ("RKLB", c("Industrials", "Aerospace & Defense", "United States")),
    ("TWLO", c("Technology", "Software—Application", "United States")),
    ("MDB", c("Technology", "Software—Application", "United States")),
    ("DOCU", c("Technology", "Software—Application", "United States")),
    ("ZM", c("Technology", "Software—Application", "United States")),
    ("OKTA", c("Technology", "Software—Infrastructure", "United States")),
    ("TTD", c("Technology", "Software—Application", "United States")),
    ("VEEV", c("Technology", "Software—Application", "United States")),
    ("BILL", c("Technology", "Software—Application", "United States")),
    ("GDDY", c("Technology", "Software—Infrastructure", "United States")),
    ("GEN", c("Technology", "Software—Infrastructure", "United States")),
    ("EPAM", c("Technology", "Information Technology Services", "United States")),
    ("IT", c("Technology", "Information Technology Services", "United States")),
    ("ACN", c("Technology", "Information Technology Services", "Ireland")),
    ("CTSH", c("Technology", "Information Technology Services", "United States")),
    ("INFY", c("Technology", "Information Technology Services", "India")),
    ("WIT", c("Technology", "Information Technology Services", "India")),
    ("GOOGL", c("Communication Services", "Internet Content & Information", "United States")),
    ("GOOG", c("Communication Services", "Internet Content & Information", "United States")),
    ("META", c("Communication Services", "Internet Content & Information", "United States")),
    ("T", c("Communication Services", "Telecom Services", "United States")),
    ("VZ", c("Communication Services", "Telecom Services", "United States")),
    ("TMUS", c("Communication Services", "Telecom Services", "United States")),
    ("DIS", c("Communication Services", "Entertainment", "United States")),
    ("NFLX", c("Communication Services", "Entertainment", "United States")),
    ("CMCSA", c("Communication Services", "Entertainment", "United States")),
    ("CHTR", c("Communication Services", "Entertainment", "United States")),
    ("EA", c("Communication Services", "Electronic Gaming & Multimedia", "United States")),
    ("TTWO", c("Communication Services", "Electronic Gaming & Multimedia", "United States")),
    ("RBLX", c("Communication Services", "Electronic Gaming & Multimedia", "United States")),
    ("WBD", c("Communication Services", "Entertainment", "United States")),
    ("PARA", c("Communication Services", "Entertainment", "United States")),
    ("FOX", c("Communication Services", "Entertainment", "United States")),
    ("FOXA", c("Communication Services", "Entertainment", "United States")),
    ("SPOT", c("Communication Services", "Internet Content & Information", "Sweden")),
    ("SNAP", c("Communication Services", "Internet Content & Information", "United States")),
    ("PINS", c("Communication Services", "Internet Content & Information", "United States")),
    ("MTCH", c("Communication Services", "Internet Content & Information", "United States")),
    ("AMZN", c("Consumer Cyclical", "Internet Retail", "United States")),
    ("TSLA", c("Consumer Cyclical", "Auto Manufacturers", "United States")),
    ("HD", c("Consumer Cyclical", "Home Improvement Retail", "United States")),
    ("MCD", c("Consumer Cyclical", "Restaurants", "United States")),
    ("SBUX", c("Consumer Cyclical", "Restaurants", "United States")),
    ("NKE", c("Consumer Cyclical", "Footwear & Accessories", "United States")),
    ("LOW", c("Consumer Cyclical", "Home Improvement Retail", "United States")),
    ("TJX", c("Consumer Cyclical", "Apparel Retail", "United States")),
    ("BKNG", c("Consumer Cyclical", "Travel Services", "United States")),
    ("F", c("Consumer Cyclical", "Auto Manufacturers", "United States")),
    ("GM", c("Consumer Cyclical", "Auto Manufacturers", "United States")),
    ("TM", c("Consumer Cyclical", "Auto Manufacturers", "Japan")),
    ("ROST", c("Consumer Cyclical", "Apparel Retail", "United States")),
    ("DHI", c("Consumer Cyclical", "Residential Construction", "United States")),
    ("LEN", c("Consumer Cyclical", "Residential Construction", "United States")),
    ("PHM", c("Consumer Cyclical", "Residential Construction", "United States")),
    ("NVR", c("Consumer Cyclical", "Residential Construction", "United States")),
    ("CMG", c("Consumer Cyclical", "Restaurants", "United States")),
    ("YUM", c("Consumer Cyclical", "Restaurants", "United States")),
    ("DPZ", c("Consumer Cyclical", "Restaurants", "United States")),
    ("ORLY", c("Consumer Cyclical", "Specialty Retail", "United States")),
    ("AZO", c("Consumer Cyclical", "Specialty Retail", "United States")),
    ("EBAY", c("Consumer Cyclical", "Internet Retail", "United States")),
    ("ETSY", c("Consumer Cyclical", "Internet Retail", "United States")),
    ("LULU", c("Consumer Cyclical", "Apparel Retail", "Canada")),
    ("RCL", c("Consumer Cyclical", "Travel Services", "United States")),
    ("MAR", c("Consumer Cyclical", "Lodging", "United States")),
    ("HLT", c("Consumer Cyclical", "Lodging", "United States")),
    ("EXPE", c("Consumer Cyclical", "Travel Services", "United States")),
    ("LVS", c("Consumer Cyclical", "Resorts & Casinos", "United States")),
    ("WYNN", c("Consumer Cyclical", "Resorts & Casinos", "United States")),
    ("APTV", c("Consumer Cyclical", "Auto Parts", "Ireland")),
    ("BWA", c("Consumer Cyclical", "Auto Parts", "United States")),
    ("GPC", c("Consumer Cyclical", "Specialty Retail", "United States")),
    ("PG", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("COST", c("Consumer Defensive", "Discount Stores", "United States")),
    ("WMT", c("Consumer Defensive", "Discount Stores", "United States")),
    ("KO", c("Consumer Defensive", "Beverages—Non-Alcoholic", "United States")),
    ("PEP", c("Consumer Defensive", "Beverages—Non-Alcoholic", "United States")),
    ("PM", c("Consumer Defensive", "Tobacco", "United States")),
    ("MO", c("Consumer Defensive", "Tobacco", "United States")),
    ("BTI", c("Consumer Defensive", "Tobacco", "United Kingdom")),
    ("CL", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("EL", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("KMB", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("GIS", c("Consumer Defensive", "Packaged Foods", "United States")),
    ("K", c("Consumer Defensive", "Packaged Foods", "United States")),
    ("HSY", c("Consumer Defensive", "Confectioners", "United States")),
    ("MDLZ", c("Consumer Defensive", "Confectioners", "United States")),
    ("STZ", c("Consumer Defensive", "Beverages—Brewers", "United States")),
    ("DEO", c("Consumer Defensive", "Beverages—Wineries & Distilleries", "United Kingdom")),
    ("BUD", c("Consumer Defensive", "Beverages—Brewers", "Belgium")),
    ("ADM", c("Consumer Defensive", "Farm Products", "United States")),
    ("SYY", c("Consumer Defensive", "Food Distribution", "United States")),
    ("KDP", c("Consumer Defensive", "Beverages—Non-Alcoholic", "United States")),
    ("MNST", c("Consumer Defensive", "Beverages—Non-Alcoholic", "United States")),
    ("KR", c("Consumer Defensive", "Grocery Stores", "United States")),
    ("TGT", c("Consumer Defensive", "Discount Stores", "United States")),
    ("DG", c("Consumer Defensive", "Discount Stores", "United States")),
    ("DLTR", c("Consumer Defensive", "Discount Stores", "United States")),
    ("SJM", c("Consumer Defensive", "Packaged Foods", "United States")),
    ("CAG", c("Consumer Defensive", "Packaged Foods", "United States")),
    ("HRL", c("Consumer Defensive", "Packaged Foods", "United States")),
    ("CHD", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("CLX", c("Consumer Defensive", "Household & Personal Products", "United States")),
    ("BRK.B", c("Financial Services", "Insurance—Diversified", "United States")),
    ("BRK-B", c("Financial Services", "Insurance—Diversified", "United States")),
    ("JPM", c("Financial Services", "Banks—Diversified", "United States")),
    ("V", c("Financial Services", "Credit Services", "United States")),
    ("MA", c("Financial Services", "Credit Services", "United States")),
    ("GS", c("Financial Services", "Capital Markets", "United States")),
    ("MS", c("Financial Services", "Capital Markets", "United States")),
    ("BAC", c("Financial Services", "Banks—Diversified", "United States")),
    ("C", c("Financial Services", "Banks—Diversified", "United States")),
    ("WFC", c("Financial Services", "Banks—Diversified", "United States")),
    ("BLK", c("Financial Services", "Asset Management", "United States")),
    ("SCHW", c("Financial Services", "Capital Markets", "United States")),
    ("AXP", c("Financial Services", "Credit Services", "United States")),
    ("SPGI", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("BX", c("Financial Services", "Asset Management", "United States")),
    ("CB", c("Financial Services", "Insurance—Property & Casualty", "United States")),
    ("MMC", c("Financial Services", "Insurance Brokers", "United States")),
    ("PGR", c("Financial Services", "Insurance—Property & Casualty", "United States")),
    ("AIG", c("Financial Services", "Insurance—Diversified", "United States")),
    ("MET", c("Financial Services", "Insurance—Life", "United States")),
    ("PRU", c("Financial Services", "Insurance—Life", "United States")),
    ("AFL", c("Financial Services", "Insurance—Life", "United States")),
    ("ALL", c("Financial Services", "Insurance—Property & Casualty", "United States")),
    ("TRV", c("Financial Services", "Insurance—Property & Casualty", "United States")),
    ("HIG", c("Financial Services", "Insurance—Diversified", "United States")),
    ("AON", c("Financial Services", "Insurance Brokers", "Ireland")),
    ("ICE", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("CME", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("MCO", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("MSCI", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("USB", c("Financial Services", "Banks—Regional", "United States")),
    ("PNC", c("Financial Services", "Banks—Regional", "United States")),
    ("TFC", c("Financial Services", "Banks—Regional", "United States")),
    ("COF", c("Financial Services", "Credit Services", "United States")),
    ("DFS", c("Financial Services", "Credit Services", "United States")),
    ("SYF", c("Financial Services", "Credit Services", "United States")),
    ("FITB", c("Financial Services", "Banks—Regional", "United States")),
    ("MTB", c("Financial Services", "Banks—Regional", "United States")),
    ("HBAN", c("Financial Services", "Banks—Regional", "United States")),
    ("RF", c("Financial Services", "Banks—Regional", "United States")),
    ("CFG", c("Financial Services", "Banks—Regional", "United States")),
    ("KEY", c("Financial Services", "Banks—Regional", "United States")),
    ("KKR", c("Financial Services", "Asset Management", "United States")),
    ("APO", c("Financial Services", "Asset Management", "United States")),
    ("ARES", c("Financial Services", "Asset Management", "United States")),
    ("OWL", c("Financial Services", "Asset Management", "United States")),
    ("RJF", c("Financial Services", "Capital Markets", "United States")),
    ("IBKR", c("Financial Services", "Capital Markets", "United States")),
    ("NDAQ", c("Financial Services", "Financial Data & Stock Exchanges", "United States")),
    ("FIS", c("Financial Services", "Information Technology Services", "United States")),
    ("FISV", c("Financial Services", "Information Technology Services", "United States")),
    ("GPN", c("Financial Services", "Information Technology Services", "United States")),
    ("PYPL", c("Financial Services", "Credit Services", "United States")),
    ("SQ", c("Financial Services", "Credit Services", "United States")),
    ("TROW", c("Financial Services", "Asset Management", "United States")),
    ("BEN", c("Financial Services", "Asset Management", "United States")),
    ("IVZ", c("Financial Services", "Asset Management", "United States")),
    ("HSBC", c("Financial Services", "Banks—Diversified", "United Kingdom")),
    ("IBN", c("Financial Services", "Banks—Regional", "India")),
    ("UNH", c("Healthcare", "Healthcare Plans", "United States")),
    ("JNJ", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("ABBV", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("LLY", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("MRK", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("PFE", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("TMO", c("Healthcare", "Diagnostics & Research", "United States")),
    ("ABT", c("Healthcare", "Medical Devices", "United States")),
    ("AMGN", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("GILD", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("BMY", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("MDT", c("Healthcare", "Medical Devices", "United States")),
    ("ISRG", c("Healthcare", "Medical Instruments & Supplies", "United States")),
    ("SYK", c("Healthcare", "Medical Devices", "United States")),
    ("CI", c("Healthcare", "Healthcare Plans", "United States")),
    ("ELV", c("Healthcare", "Healthcare Plans", "United States")),
    ("NVO", c("Healthcare", "Drug Manufacturers—General", "Denmark")),
    ("AZN", c("Healthcare", "Drug Manufacturers—General", "United Kingdom")),
    ("BSX", c("Healthcare", "Medical Devices", "United States")),
    ("BDX", c("Healthcare", "Medical Instruments & Supplies", "United States")),
    ("EW", c("Healthcare", "Medical Devices", "United States")),
    ("ZTS", c("Healthcare", "Drug Manufacturers—Specialty & Generic", "United States")),
    ("VRTX", c("Healthcare", "Biotechnology", "United States")),
    ("REGN", c("Healthcare", "Biotechnology", "United States")),
    ("MRNA", c("Healthcare", "Biotechnology", "United States")),
    ("BIIB", c("Healthcare", "Drug Manufacturers—General", "United States")),
    ("IQV", c("Healthcare", "Diagnostics & Research", "United States")),
    ("DHR", c("Healthcare", "Diagnostics & Research", "United States")),
    ("A", c("Healthcare", "Diagnostics & Research", "United States")),
    ("DXCM", c("Healthcare", "Medical Devices", "United States")),
    ("BAX", c("Healthcare", "Medical Instruments & Supplies", "United States")),
    ("HCA", c("Healthcare", "Medical Care Facilities", "United States")),
    ("HUM", c("Healthcare", "Healthcare Plans", "United States")),
    ("CNC", c("Healthcare", "Healthcare Plans", "United States")),
    ("MOH", c("Healthcare", "Healthcare Plans", "United States")),
    ("CVS", c("Healthcare", "Healthcare Plans", "United States")),
    ("MCK", c("Healthcare", "Medical Distribution", "United States")),
    ("CAH", c("Healthcare", "Medical Distribution", "United States")),
    ("ABC", c("Healthcare", "Medical Distribution", "United States")),
    ("GEHC", c("Healthcare", "Medical Devices", "United States")),
    ("ALNY", c("Healthcare", "Biotechnology", "United States")),
    ("ILMN", c("Healthcare", "Diagnostics & Research", "United States")),
    ("IDXX", c("Healthcare", "Diagnostics & Research", "United States")),
    ("GSK", c("Healthcare", "Drug Manufacturers—General", "United Kingdom")),
    ("SNY", c("Healthcare", "Drug Manufacturers—General", "France")),
    ("XOM", c("Energy", "Oil & Gas Integrated", "United States")),
    ("CVX", c("Energy", "Oil & Gas Integrated", "United States")),
    ("COP", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("SLB", c("Energy", "Oil & Gas Equipment & Services", "United States")),
    ("EOG", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("PSX", c("Energy", "Oil & Gas Refining & Marketing", "United States")),
    ("VLO", c("Energy", "Oil & Gas Refining & Marketing", "United States")),
    ("MPC", c("Energy", "Oil & Gas Refining & Marketing", "United States")),
    ("SHEL", c("Energy", "Oil & Gas Integrated", "United Kingdom")),
    ("TTE", c("Energy", "Oil & Gas Integrated", "France")),
    ("BP", c("Energy", "Oil & Gas Integrated", "United Kingdom")),
    ("PXD", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("DVN", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("OXY", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("WMB", c("Energy", "Oil & Gas Midstream", "United States")),
    ("KMI", c("Energy", "Oil & Gas Midstream", "United States")),
    ("OKE", c("Energy", "Oil & Gas Midstream", "United States")),
    ("ET", c("Energy", "Oil & Gas Midstream", "United States")),
    ("EPD", c("Energy", "Oil & Gas Midstream", "United States")),
    ("ENB", c("Energy", "Oil & Gas Midstream", "Canada")),
    ("HES", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("FANG", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("HAL", c("Energy", "Oil & Gas Equipment & Services", "United States")),
    ("BKR", c("Energy", "Oil & Gas Equipment & Services", "United States")),
    ("CTRA", c("Energy", "Oil & Gas Exploration & Production", "United States")),
    ("TRP", c("Energy", "Oil & Gas Midstream", "Canada")),
    ("SU", c("Energy", "Oil & Gas Integrated", "Canada")),
    ("CNQ", c("Energy", "Oil & Gas Exploration & Production", "Canada")),
    ("E", c("Energy", "Oil & Gas Integrated", "Italy")),
    ("EQNR", c("Energy", "Oil & Gas Integrated", "Norway")),
    ("BA", c("Industrials", "Aerospace & Defense", "United States")),
    ("RTX", c("Industrials", "Aerospace & Defense", "United States")),
    ("LMT", c("Industrials", "Aerospace & Defense", "United States")),
    ("GE", c("Industrials", "Aerospace & Defense", "United States")),
    ("CAT", c("Industrials", "Farm & Heavy Construction Machinery", "United States")),
    ("HON", c("Industrials", "Conglomerates", "United States")),
    ("UNP", c("Industrials", "Railroads", "United States")),
    ("UPS", c("Industrials", "Integrated Freight & Logistics", "United States")),
    ("DE", c("Industrials", "Farm & Heavy Construction Machinery", "United States")),
    ("MMM", c("Industrials", "Conglomerates", "United States")),
    ("ETN", c("Industrials", "Specialty Industrial Machinery", "Ireland")),
    ("EMR", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("ITW", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("FDX", c("Industrials", "Integrated Freight & Logistics", "United States")),
    ("WM", c("Industrials", "Waste Management", "United States")),
    ("RSG", c("Industrials", "Waste Management", "United States")),
    ("GD", c("Industrials", "Aerospace & Defense", "United States")),
    ("NOC", c("Industrials", "Aerospace & Defense", "United States")),
    ("GEV", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("TDG", c("Industrials", "Aerospace & Defense", "United States")),
    ("HWM", c("Industrials", "Aerospace & Defense", "United States")),
    ("CSX", c("Industrials", "Railroads", "United States")),
    ("NSC", c("Industrials", "Railroads", "United States")),
    ("CPRT", c("Industrials", "Specialty Business Services", "United States")),
    ("CTAS", c("Industrials", "Specialty Business Services", "United States")),
    ("FAST", c("Industrials", "Building Products & Equipment", "United States")),
    ("VRSK", c("Industrials", "Consulting Services", "United States")),
    ("ROK", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("AME", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("DOV", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("PCAR", c("Industrials", "Farm & Heavy Construction Machinery", "United States")),
    ("PWR", c("Industrials", "Engineering & Construction", "United States")),
    ("WAB", c("Industrials", "Railroads", "United States")),
    ("TT", c("Industrials", "Building Products & Equipment", "Ireland")),
    ("CARR", c("Industrials", "Building Products & Equipment", "United States")),
    ("IR", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("XYL", c("Industrials", "Specialty Industrial Machinery", "United States")),
    ("SWK", c("Industrials", "Tools & Accessories", "United States")),
    ("GWW", c("Industrials", "Industrial Distribution", "United States")),
    ("ODFL", c("Industrials", "Trucking", "United States")),
    ("DAL", c("Industrials", "Airlines", "United States")),
    ("UAL", c("Industrials", "Airlines", "United States")),
    ("LUV", c("Industrials", "Airlines", "United States")),
    ("CNI", c("Industrials", "Railroads", "Canada")),
    ("CP", c("Industrials", "Railroads", "Canada")),
    ("NEE", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("DUK", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("SO", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("AEP", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("D", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("SRE", c("Utilities", "Utilities—Diversified", "United States")),
    ("EXC", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("XEL", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("ED", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("WEC", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("PCG", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("EIX", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("AWK", c("Utilities", "Utilities—Regulated Water", "United States")),
    ("ES", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("ETR", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("PPL", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("FE", c("Utilities", "Utilities—Regulated Electric", "United States")),
    ("CEG", c("Utilities", "Utilities—Independent Power Producers", "United States")),
    ("VST", c("Utilities", "Utilities—Independent Power Producers", "United States")),
    ("PLD", c("Real Estate", "REIT—Industrial", "United States")),
    ("AMT", c("Real Estate", "REIT—Specialty", "United States")),
    ("CCI", c("Real Estate", "REIT—Specialty", "United States")),
    ("SPG", c("Real Estate", "REIT—Retail", "United States")),
    ("O", c("Real Estate", "REIT—Retail", "United States")),
    ("EQIX", c("Real Estate", "REIT—Specialty", "United States")),
    ("PSA", c("Real Estate", "REIT—Specialty", "United States")),
    ("DLR", c("Real Estate", "REIT—Specialty", "United States")),
    ("WELL", c("Real Estate", "REIT—Healthcare Facilities", "United States")),
    ("VICI", c("Real Estate", "REIT—Specialty", "United States")),
    ("SBAC", c("Real Estate", "REIT—Specialty", "United States")),
    ("CBRE", c("Real Estate", "Real Estate Services", "United States")),
    ("AVB", c("Real Estate", "REIT—Residential", "United States")),
    ("EQR", c("Real Estate", "REIT—Residential", "United States")),
    ("ARE", c("Real Estate", "REIT—Office", "United States")),
    ("MAA", c("Real Estate", "REIT—Residential", "United States")),
    ("IRM", c("Real Estate", "REIT—Specialty", "United States")),
    ("LIN", c("Basic Materials", "Specialty Chemicals", "United Kingdom")),
    ("APD", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("SHW", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("RIO", c("Basic Materials", "Other Industrial Metals & Mining", "United Kingdom")),
    ("BHP", c("Basic Materials", "Other Industrial Metals & Mining", "Australia")),
    ("VALE", c("Basic Materials", "Other Industrial Metals & Mining", "Brazil")),
    ("NEM", c("Basic Materials", "Gold", "United States")),
    ("GOLD", c("Basic Materials", "Gold", "Canada")),
    ("FCX", c("Basic Materials", "Copper", "United States")),
    ("ECL", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("DD", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("PPG", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("NUE", c("Basic Materials", "Steel", "United States")),
    ("DOW", c("Basic Materials", "Chemicals", "United States")),
    ("CTVA", c("Basic Materials", "Agricultural Inputs", "United States")),
    ("VMC", c("Basic Materials", "Building Materials", "United States")),
    ("MLM", c("Basic Materials", "Building Materials", "United States")),
    ("ALB", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("IFF", c("Basic Materials", "Specialty Chemicals", "United States")),
    ("CE", c("Basic Materials", "Chemicals", "United States")),
    ("SCCO", c("Basic Materials", "Copper", "United States")),
    ("TECK", c("Basic Materials", "Other Industrial Metals & Mining", "Canada")),
];

const TICKER_ALIASES: &[(&str, &str)] = &[
    ("FB", "META"),
    ("ALTM", "MO"),
    ("ANTM", "ELV"),
    ("TWTR", "X"),
    ("DISCA", "WBD"),
    ("DISCK", "WBD"),
    ("VIAC", "PARA"),
    ("VIACA", "PARA"),
    ("KSU", "CP"),
    ("XLNX", "AMD"),
    ("ATVI", "MSFT"),
    ("CERN", "ORCL"),
    ("CTXS", "CLOUD"),
    ("BRK.A", "BRK.B"),
    ("BRK/A", "BRK.B"),
    ("BRK/B", "BRK.B"),
    ("BRK A", "BRK.B"),
    ("BRK B", "BRK.B"),
    ("BF-B", "BF.B"),
];

// Order matters: substring lookup stops at the first key contained in the name.
const NAME_TO_TICKER: &[(&str, &str)] = &[
    ("PHILIP MORRIS INTERNATIONAL", "PM"),
    ("PHILIP MORRIS INTERNATIONAL INC", "PM"),
    ("PHILIP MORRIS INTERNATIONAL INC.", "PM"),
    ("META PLATFORMS INC", "META"),
    ("META PLATFORMS", "META"),
    ("ALPHABET INC", "GOOGL"),
    ("MICROSOFT CORP", "MSFT"),
    ("MICROSOFT CORPORATION", "MSFT"),
    ("APPLE INC", "AAPL"),
    ("AMAZON.COM INC", "AMZN"),
    ("AMAZON COM INC", "AMZN"),
    ("NVIDIA CORP", "NVDA"),
    ("NVIDIA CORPORATION", "NVDA"),
    ("BROADCOM INC", "AVGO"),
    ("TESLA INC", "TSLA"),
    ("BERKSHIRE HATHAWAY", "BRK.B"),
    ("JPMORGAN CHASE", "JPM"),
    ("JPMORGAN CHASE & CO", "JPM"),
    ("UNITEDHEALTH GROUP", "UNH"),
    ("UNITEDHEALTH GROUP INC", "UNH"),
    ("JOHNSON & JOHNSON", "JNJ"),
    ("EXXON MOBIL CORP", "XOM"),
    ("EXXON MOBIL CORPORATION", "XOM"),
    ("PROCTER & GAMBLE", "PG"),
    ("PROCTER & GAMBLE CO", "PG"),
    ("HOME DEPOT INC", "HD"),
    ("VISA INC", "V"),
    ("MASTERCARD INC", "MA"),
    ("CHEVRON CORP", "CVX"),
    ("COCA-COLA CO", "KO"),
    ("PEPSICO INC", "PEP"),
    ("COSTCO WHOLESALE CORP", "COST"),
    ("WALMART INC", "WMT"),
    ("ABBOTT LABORATORIES", "ABT"),
    ("ABBVIE INC", "ABBV"),
    ("ELI LILLY & CO", "LLY"),
    ("ELI LILLY AND CO", "LLY"),
    ("MERCK & CO INC", "MRK"),
    ("PFIZER INC", "PFE"),
    ("THERMO FISHER SCIENTIFIC", "TMO"),
    ("THERMO FISHER SCIENTIFIC INC", "TMO"),
    ("CISCO SYSTEMS INC", "CSCO"),
    ("ORACLE CORP", "ORCL"),
    ("ORACLE CORPORATION", "ORCL"),
    ("ADOBE INC", "ADBE"),
    ("SALESFORCE INC", "CRM"),
    ("ADVANCED MICRO DEVICES", "AMD"),
    ("INTEL CORP", "INTC"),
    ("QUALCOMM INC", "QCOM"),
    ("INTERNATIONAL BUSINESS MACHINES", "IBM"),
    ("AT&T INC", "T"),
    ("AT&T INC.", "T"),
    ("VERIZON COMMUNICATIONS INC", "VZ"),
    ("VERIZON COMMUNICATIONS INC.", "VZ"),
    ("T-MOBILE US INC", "TMUS"),
    ("WALT DISNEY CO", "DIS"),
    ("NETFLIX INC", "NFLX"),
    ("COMCAST CORP", "CMCSA"),
    ("BOEING CO", "BA"),
    ("CATERPILLAR INC", "CAT"),
    ("HONEYWELL INTERNATIONAL", "HON"),
    ("UNION PACIFIC CORP", "UNP"),
    ("GENERAL ELECTRIC CO", "GE"),
    ("GOLDMAN SACHS GROUP INC", "GS"),
    ("MORGAN STANLEY", "MS"),
    ("BANK OF AMERICA CORP", "BAC"),
    ("CITIGROUP INC", "C"),
    ("WELLS FARGO & CO", "WFC"),
    ("BLACKROCK INC", "BLK"),
    ("CHARLES SCHWAB CORP", "SCHW"),
    ("AMERICAN EXPRESS CO", "AXP"),
    ("TAIWAN SEMICONDUCTOR MFG", "TSM"),
    ("TAIWAN SEMICONDUCTOR MANUFACTURING", "TSM"),
    ("ASML HOLDING NV", "ASML"),
    ("NOVO NORDISK", "NVO"),
    ("NOVO-NORDISK A/S", "NVO"),
    ("ASTRAZENECA PLC", "AZN"),
    ("SHELL PLC", "SHEL"),
    ("BP PLC", "BP"),
    ("TOTALENERGIES SE", "TTE"),
    ("RIO TINTO PLC", "RIO"),
    ("BHP GROUP LTD", "BHP"),
    ("VALE SA", "VALE"),
    ("TOYOTA MOTOR CORP", "TM"),
    ("MCDONALD'S CORP", "MCD"),
    ("MCDONALDS CORP", "MCD"),
    ("STARBUCKS CORP", "SBUX"),
    ("NIKE INC", "NKE"),
    ("LOCKHEED MARTIN CORP", "LMT"),
    ("RAYTHEON TECHNOLOGIES", "RTX"),
    ("RTX CORP", "RTX"),
    ("NEXTERA ENERGY INC", "NEE"),
    ("DUKE ENERGY CORP", "DUK"),
    ("SOUTHERN CO", "SO"),
    ("BRITISH AMERICAN TOBACCO", "BTI"),
    ("ALTRIA GROUP INC", "MO"),
    ("LINDE PLC", "LIN"),
    ("CONOCOPHILLIPS", "COP"),
    ("SCHLUMBERGER LTD", "SLB"),
    ("SLB", "SLB"),
    ("FREEPORT-MCMORAN INC", "FCX"),
    ("DEERE & CO", "DE"),
    ("S&P GLOBAL INC", "SPGI"),
    ("PROLOGIS INC", "PLD"),
    ("AMERICAN TOWER CORP", "AMT"),
    ("BOOKING HOLDINGS INC", "BKNG"),
    ("SERVICENOW INC", "NOW"),
    ("INTUIT INC", "INTU"),
    ("APPLIED MATERIALS INC", "AMAT"),
    ("LAM RESEARCH CORP", "LRCX"),
    ("TEXAS INSTRUMENTS INC", "TXN"),
    ("MICRON TECHNOLOGY INC", "MU"),
    ("PROGRESSIVE CORP", "PGR"),
    ("PROGRESSIVE CORPORATION", "PGR"),
    ("CIGNA GROUP", "CI"),
    ("CIGNA CORP", "CI"),
    ("CIGNA", "CI"),
    ("ENBRIDGE INC", "ENB"),
    ("ENBRIDGE", "ENB"),
    ("AMERICAN INTERNATIONAL GROUP", "AIG"),
    ("AMERICAN INTL GROUP INC", "AIG"),
    ("CHUBB LTD", "CB"),
    ("CHUBB LIMITED", "CB"),
    ("XCEL ENERGY INC", "XEL"),
    ("XCEL ENERGY", "XEL"),
    ("ICICI BANK LTD", "IBN"),
    ("ICICI BANK", "IBN"),
    ("MARSH & MCLENNAN", "MMC"),
    ("MARSH & MCLENNAN COS", "MMC"),
    ("S&P GLOBAL", "SPGI"),
    ("INTERCONTINENTAL EXCHANGE", "ICE"),
    ("CME GROUP INC", "CME"),
    ("MOODY'S CORP", "MCO"),
    ("MOODYS CORP", "MCO"),
    ("METLIFE INC", "MET"),
    ("PRUDENTIAL FINANCIAL", "PRU"),
    ("AFLAC INC", "AFL"),
    ("ALLSTATE CORP", "ALL"),
    ("TRAVELERS COS INC", "TRV"),
    ("AON PLC", "AON"),
    ("HSBC HOLDINGS PLC", "HSBC"),
    ("CANADIAN NATIONAL RAILWAY", "CNI"),
    ("CANADIAN PACIFIC KANSAS CITY", "CP"),
    ("CONSTELLATION ENERGY", "CEG"),
    ("VISTRA CORP", "VST"),
    ("DOMINION ENERGY INC", "D"),
    ("SEMPRA", "SRE"),
    ("EXELON CORP", "EXC"),
    ("CONSOLIDATED EDISON", "ED"),
    ("WEC ENERGY GROUP", "WEC"),
    ("PACIFIC GAS & ELECTRIC", "PCG"),
    ("EVERSOURCE ENERGY", "ES"),
    ("ENTERGY CORP", "ETR"),
    ("FIRSTENERGY CORP", "FE"),
    ("WILLIAMS COS INC", "WMB"),
    ("KINDER MORGAN INC", "KMI"),
    ("ONEOK INC", "OKE"),
    ("ENTERPRISE PRODUCTS PARTNERS", "EPD"),
    ("TC ENERGY CORP", "TRP"),
    ("SUNCOR ENERGY INC", "SU"),
    ("CANADIAN NATURAL RESOURCES", "CNQ"),
    ("EQUINOR ASA", "EQNR"),
    ("DANAHER CORP", "DHR"),
    ("AGILENT TECHNOLOGIES INC", "A"),
    ("BECTON DICKINSON AND CO", "BDX"),
    ("EDWARDS LIFESCIENCES", "EW"),
    ("BOSTON SCIENTIFIC CORP", "BSX"),
    ("VERTEX PHARMACEUTICALS", "VRTX"),
    ("REGENERON PHARMACEUTICALS", "REGN"),
    ("MODERNA INC", "MRNA"),
    ("CVS HEALTH CORP", "CVS"),
    ("MCKESSON CORP", "MCK"),
    ("CARDINAL HEALTH INC", "CAH"),
    ("HUMANA INC", "HUM"),
    ("CENTENE CORP", "CNC"),
    ("GLAXOSMITHKLINE PLC", "GSK"),
    ("GSK PLC", "GSK"),
    ("SANOFI SA", "SNY"),
    ("SANOFI", "SNY"),
    ("ZOETIS INC", "ZTS"),
    ("ACCENTURE PLC", "ACN"),
    ("INFOSYS LTD", "INFY"),
    ("PALANTIR TECHNOLOGIES", "PLTR"),
    ("CROWDSTRIKE HOLDINGS", "CRWD"),
    ("FORTINET INC", "FTNT"),
    ("PALO ALTO NETWORKS INC", "PANW"),
    ("SNOWFLAKE INC", "SNOW"),
    ("DATADOG INC", "DDOG"),
    ("CLOUDFLARE INC", "NET"),
    ("UBER TECHNOLOGIES INC", "UBER"),
    ("AIRBNB INC", "ABNB"),
    ("PAYPAL HOLDINGS INC", "PYPL"),
    ("BLOCK INC", "SQ"),
    ("DIGITAL REALTY TRUST", "DLR"),
    ("WELLTOWER INC", "WELL"),
    ("SIMON PROPERTY GROUP", "SPG"),
    ("PUBLIC STORAGE", "PSA"),
    ("AMERICAN TOWER", "AMT"),
    ("IRON MOUNTAIN INC", "IRM"),
    ("CROWN CASTLE INC", "CCI"),
    ("SBA COMMUNICATIONS", "SBAC"),
    ("DEVON ENERGY CORP", "DVN"),
    ("OCCIDENTAL PETROLEUM", "OXY"),
    ("PIONEER NATURAL RESOURCES", "PXD"),
    ("HESS CORP", "HES"),
    ("HALLIBURTON CO", "HAL"),
    ("BAKER HUGHES CO", "BKR"),
    ("SCHLUMBERGER NV", "SLB"),
    ("NUCOR CORP", "NUE"),
    ("FREEPORT MCMORAN", "FCX"),
    ("NEWMONT CORP", "NEM"),
    ("BARRICK GOLD CORP", "GOLD"),
    ("SOUTHERN COPPER CORP", "SCCO"),
    ("TECK RESOURCES LTD", "TECK"),
    ("ECOLAB INC", "ECL"),
    ("DUPONT DE NEMOURS INC", "DD"),
    ("PPG INDUSTRIES INC", "PPG"),
    ("SHERWIN-WILLIAMS CO", "SHW"),
    ("CORTEVA INC", "CTVA"),
    ("AIR PRODUCTS AND CHEMICALS", "APD"),
    ("GENERAL DYNAMICS CORP", "GD"),
    ("NORTHROP GRUMMAN CORP", "NOC"),
    ("L3HARRIS TECHNOLOGIES", "LHX"),
    ("TRANSDIGM GROUP INC", "TDG"),
    ("CSX CORP", "CSX"),
    ("NORFOLK SOUTHERN CORP", "NSC"),
    ("EMERSON ELECTRIC CO", "EMR"),
    ("PARKER-HANNIFIN CORP", "PH"),
    ("ILLINOIS TOOL WORKS", "ITW"),
    ("EATON CORP PLC", "ETN"),
    ("AUTOMATIC DATA PROCESSING", "ADP"),
    ("VERISK ANALYTICS INC", "VRSK"),
    ("REPUBLIC SERVICES INC", "RSG"),
    ("WASTE MANAGEMENT INC", "WM"),
    ("DELTA AIR LINES INC", "DAL"),
    ("UNITED AIRLINES HOLDINGS", "UAL"),
    ("SOUTHWEST AIRLINES CO", "LUV"),
    ("CONSTELLATION BRANDS INC", "STZ"),
    ("MONSTER BEVERAGE CORP", "MNST"),
    ("KEURIG DR PEPPER INC", "KDP"),
    ("TARGET CORP", "TGT"),
    ("KROGER CO", "KR"),
    ("DOLLAR GENERAL CORP", "DG"),
    ("SYSCO CORP", "SYY"),
    ("ARCHER-DANIELS-MIDLAND", "ADM"),
    ("CHURCH & DWIGHT CO", "CHD"),
    ("CLOROX CO", "CLX"),
    ("CHIPOTLE MEXICAN GRILL", "CMG"),
    ("YUM BRANDS INC", "YUM"),
    ("MARRIOTT INTERNATIONAL", "MAR"),
    ("HILTON WORLDWIDE HOLDINGS", "HLT"),
    ("D.R. HORTON INC", "DHI"),
    ("LENNAR CORP", "LEN"),
    ("O'REILLY AUTOMOTIVE INC", "ORLY"),
    ("AUTOZONE INC", "AZO"),
    ("ROSS STORES INC", "ROST"),
    ("LULULEMON ATHLETICA", "LULU"),
    ("KKR & CO INC", "KKR"),
    ("APOLLO GLOBAL MANAGEMENT", "APO"),
    ("U.S. BANCORP", "USB"),
    ("PNC FINANCIAL SERVICES", "PNC"),
    ("CAPITAL ONE FINANCIAL", "COF"),
    ("DISCOVER FINANCIAL SERVICES", "DFS"),
    ("FIDELITY NATIONAL INFORMATION", "FIS"),
    ("FISERV INC", "FISV"),
    ("GLOBAL PAYMENTS INC", "GPN"),
    ("MSCI INC", "MSCI"),
    ("NASDAQ INC", "NDAQ"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_ticker_and_alias() {
        let aapl = lookup_fallback("aapl", None).unwrap();
        assert_eq!(aapl.sector, "Technology");
        assert_eq!(aapl.country, "United States");

        assert_eq!(resolve_alias("FB"), "META");
        assert_eq!(lookup_fallback("FB", None), lookup_fallback("META", None));
        assert_eq!(resolve_alias("brk/b"), "BRK.B");
    }

    #[test]
    fn resolves_by_name_when_ticker_unknown() {
        let by_name = lookup_fallback("N/A", Some("Apple Inc")).unwrap();
        assert_eq!(by_name, lookup_fallback("AAPL", None).unwrap());

        let partial = lookup_fallback("", Some("PHILIP MORRIS INTERNATIONAL INC COM")).unwrap();
        assert_eq!(partial, lookup_fallback("PM", None).unwrap());
    }

    #[test]
    fn unknown_names_miss() {
        assert_eq!(lookup_fallback("ZZZZ", Some("Nothing Holdings LLC")), None);
        assert_eq!(lookup_fallback("N/A", None), None);
    }
}
