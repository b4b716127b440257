//! HTML fixtures shared by the extraction and pipeline tests.

/// A trimmed company page with ratios, two period tables and growth rows.
pub const COMPANY_PAGE: &str = r#"
    <html><body>
      <h1>Acme Industries Ltd</h1>
      <div class="company-ratios">
        <ul id="top-ratios">
          <li><span class="name">Market Cap</span><span class="value">₹ 1,234 Cr.</span></li>
          <li><span class="name">Current Price</span><span class="value">₹ 250</span></li>
          <li><span class="name">High / Low</span><span class="value">₹ 320 / 200</span></li>
          <li><span class="name">Stock P/E</span><span class="value">18.5</span></li>
          <li><span class="name">Book Value</span><span class="value">₹ 100</span></li>
          <li><span class="name">Dividend Yield</span><span class="value">2.5 %</span></li>
          <li><span class="name">ROCE</span><span class="value">18.0 %</span></li>
          <li><span class="name">ROE</span><span class="value">16.2 %</span></li>
          <li><span class="name">Face Value</span><span class="value">₹ 10.0</span></li>
        </ul>
      </div>
      <section id="quarters">
        <table class="data-table">
          <thead><tr><th></th><th>Jun 2024</th><th>Sep 2024</th></tr></thead>
          <tbody>
            <tr><td>Sales</td><td>1,020</td><td>1,110</td></tr>
            <tr><td>OPM %</td><td>18%</td><td>19%</td></tr>
          </tbody>
        </table>
      </section>
      <section id="balance-sheet">
        <table class="data-table">
          <thead><tr><th>Particulars</th><th>Mar 2023</th><th>Mar 2024</th></tr></thead>
          <tbody>
            <tr><td>Borrowings</td><td>400</td><td>350</td></tr>
          </tbody>
        </table>
      </section>
      <table class="ranges-table">
        <tr><td>Sales growth (3Yrs)</td><td>12%</td></tr>
        <tr><td>Profit growth (3Yrs)</td><td>17%</td></tr>
      </table>
    </body></html>"#;

/// Page whose key ratios lack the 52-week range.
pub const PAGE_WITHOUT_RANGE: &str = r#"
    <html><body>
      <h1>Rangeless Ltd</h1>
      <div class="company-ratios">
        <ul id="top-ratios">
          <li><span class="name">Current Price</span><span class="value">₹ 90</span></li>
          <li><span class="name">ROE</span><span class="value">15 %</span></li>
          <li><span class="name">ROCE</span><span class="value">15 %</span></li>
        </ul>
      </div>
    </body></html>"#;
